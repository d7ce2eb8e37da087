// Shared error response body and storage fault classification
// Domain modules define their own error enums and render through these helpers

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

/// Consistent error response structure
///
/// Every error leaving the API has this JSON shape, with a machine-readable
/// `error_code` and a human-readable `message`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g., "VALIDATION_ERROR", "NOT_FOUND")
    #[schema(example = "NOT_FOUND")]
    pub error_code: String,

    /// Human-readable error message
    #[schema(example = "Task with id 7 not found")]
    pub message: String,

    /// ISO 8601 timestamp of when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.to_string(),
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Build an HTTP error response with the shared JSON body
pub fn error_response(status: StatusCode, error_code: &str, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

/// Build a 401 response carrying the bearer challenge header
pub fn unauthorized_response(message: &str) -> Response {
    let mut response = error_response(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message);
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}

/// How a database failure should be surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFault {
    /// Infrastructure fault that a caller may retry (pool exhausted, connection lost)
    Unavailable,
    /// Any other database failure
    Internal,
}

/// Classify a sqlx error as transient or not
pub fn classify(error: &sqlx::Error) -> StorageFault {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => StorageFault::Unavailable,
        _ => StorageFault::Internal,
    }
}

/// Render a storage fault without leaking database details to the client
pub fn storage_fault_response(fault: StorageFault) -> Response {
    match fault {
        StorageFault::Unavailable => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_UNAVAILABLE",
            "The service is temporarily unavailable, please retry",
        ),
        StorageFault::Internal => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal server error occurred",
        ),
    }
}
