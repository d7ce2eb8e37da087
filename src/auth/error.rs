// Authentication error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::error::{classify, error_response, storage_fault_response, unauthorized_response};

/// Message shared by every failed login, whether or not the account exists
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Message shared by every rejected bearer token
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid authentication credentials";

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired token, or a token whose
    /// subject no longer exists
    #[error("Invalid authentication credentials")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::ValidationError(msg) => {
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AuthError::EmailAlreadyRegistered => {
                warn!("Registration rejected: email already registered");
                error_response(StatusCode::BAD_REQUEST, "EMAIL_TAKEN", "Email already registered")
            }
            AuthError::InvalidCredentials => {
                warn!("Login rejected: invalid credentials");
                unauthorized_response(INVALID_CREDENTIALS_MESSAGE)
            }
            AuthError::InvalidToken => {
                warn!("Rejected bearer token");
                unauthorized_response(INVALID_TOKEN_MESSAGE)
            }
            AuthError::DatabaseError(db_error) => {
                error!("Database error in auth: {:?}", db_error);
                storage_fault_response(classify(&db_error))
            }
            AuthError::PasswordHashError(msg) => {
                error!("Password hashing error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                )
            }
            AuthError::TokenGenerationError(msg) => {
                error!("Token generation error: {}", msg);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                )
            }
        }
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailAlreadyRegistered => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::DatabaseError(e) => match classify(e) {
                crate::error::StorageFault::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                crate::error::StorageFault::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AuthError::PasswordHashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::TokenGenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
