//! Mapping of workflow failures onto HTTP responses.

use crate::types::{ErrorBody, NotFoundBody};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use notes_core::NoteWorkflowError;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

/// User-facing headline for failures with no recovery path.
pub const NOTES_ERROR_MESSAGE: &str = "An error related to your notes occurred!";

/// Failure of one request.
#[derive(Debug)]
pub enum ApiError {
    Workflow(NoteWorkflowError),
    /// The blocking worker running the workflow panicked or was cancelled.
    Worker(JoinError),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Workflow(err) => write!(f, "{err}"),
            Self::Worker(err) => write!(f, "workflow task failed: {err}"),
        }
    }
}

impl From<NoteWorkflowError> for ApiError {
    fn from(value: NoteWorkflowError) -> Self {
        Self::Workflow(value)
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::Worker(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Workflow(NoteWorkflowError::NotFound { message }) => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    message,
                }),
            )
                .into_response(),
            other => {
                log::error!("event=http_error module=web status=500 error={other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        message: NOTES_ERROR_MESSAGE.to_string(),
                        detail: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
