use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::error::{classify, error_response, storage_fault_response, StorageFault};

/// Error types for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Task with id {0} not found")]
    NotFound(i32),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl TaskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::NotFound(_) => StatusCode::NOT_FOUND,
            TaskError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TaskError::DatabaseError(e) => match classify(e) {
                StorageFault::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                StorageFault::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(id) => {
                debug!("Task with id {} not found", id);
                error_response(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Task with id {} not found", id),
                )
            }
            TaskError::ValidationError(msg) => {
                debug!("Task validation error: {}", msg);
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            TaskError::DatabaseError(db_error) => {
                error!("Database error in tasks: {:?}", db_error);
                storage_fault_response(classify(&db_error))
            }
        }
    }
}
