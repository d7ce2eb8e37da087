// Authentication module
// Argon2 password hashing, JWT bearer tokens, registration and login

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login_handler, me_handler, register_handler};
pub use middleware::{AccessPolicy, AuthenticatedUser, RequestIdentity};
pub use models::{LoginForm, RegisterRequest, RegisterResponse, TokenResponse, User, UserResponse};
pub use password::PasswordService;
pub use repository::{CredentialStore, PgUserRepository};
pub use service::AuthService;
pub use token::TokenService;
