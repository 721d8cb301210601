//! Axum route handlers for the notes listing and submission endpoints.

use crate::error::ApiError;
use crate::types::{HealthStatus, MessageBody, RouteMeta};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use notes_core::{core_version, CreateNoteOutcome, NoteStore, NoteWorkflow};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

const PAGE_TITLE: &str = "All Notes";
const PAGE_DESCRIPTION: &str = "Manage your notes with ease";

pub struct AppState<S: NoteStore> {
    pub workflow: NoteWorkflow<S>,
    pub start_time: Instant,
}

impl<S: NoteStore> AppState<S> {
    pub fn new(workflow: NoteWorkflow<S>) -> Self {
        Self {
            workflow,
            start_time: Instant::now(),
        }
    }
}

// GET /notes
pub async fn list_notes<S>(State(state): State<Arc<AppState<S>>>) -> Result<Response, ApiError>
where
    S: NoteStore + Send + Sync + 'static,
{
    let notes = tokio::task::spawn_blocking(move || state.workflow.list_notes()).await??;
    Ok((StatusCode::OK, Json(notes)).into_response())
}

// POST /notes
pub async fn create_note<S>(
    State(state): State<Arc<AppState<S>>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, ApiError>
where
    S: NoteStore + Send + Sync + 'static,
{
    let outcome =
        tokio::task::spawn_blocking(move || state.workflow.create_note(&fields)).await??;

    let response = match outcome {
        CreateNoteOutcome::Rejected { message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(MessageBody { message }),
        )
            .into_response(),
        CreateNoteOutcome::Redirect { location } => Redirect::to(location).into_response(),
    };
    Ok(response)
}

// GET /notes/meta
pub async fn meta() -> Json<RouteMeta> {
    Json(RouteMeta {
        title: PAGE_TITLE.to_string(),
        description: PAGE_DESCRIPTION.to_string(),
    })
}

// GET /health
pub async fn health<S>(State(state): State<Arc<AppState<S>>>) -> Json<HealthStatus>
where
    S: NoteStore + Send + Sync + 'static,
{
    Json(HealthStatus {
        status: "ok".to_string(),
        version: core_version().to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
