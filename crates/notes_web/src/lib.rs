//! HTTP adapter exposing the note workflow.
//!
//! # Responsibility
//! - Map `GET /notes` and `POST /notes` onto the list/create use-cases.
//! - Translate workflow outcomes into status codes and JSON envelopes.
//!
//! # Invariants
//! - Store I/O runs on the blocking pool, never on async workers.
//! - Handlers never panic on storage failure; they answer 500.

pub mod error;
pub mod routes;
pub mod types;

use axum::routing::get;
use axum::Router;
use notes_core::NoteStore;
use routes::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, NOTES_ERROR_MESSAGE};

/// Builds the service router over shared state.
pub fn build_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: NoteStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/notes",
            get(routes::list_notes::<S>).post(routes::create_note::<S>),
        )
        .route("/notes/meta", get(routes::meta))
        .route("/health", get(routes::health::<S>))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
