// Authentication service - business logic layer

use std::sync::Arc;

use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{RegisterRequest, RegisterResponse, TokenResponse, User},
    password::PasswordService,
    repository::CredentialStore,
    token::TokenService,
};
use crate::validation;

/// Authentication service coordinating registration, login and token resolution
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    token_service: TokenService,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(users: Arc<dyn CredentialStore>, token_service: TokenService) -> Self {
        Self {
            users,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// This method:
    /// 1. Validates email shape and password length before any hashing
    /// 2. Hashes the password
    /// 3. Inserts the user, relying on the store's uniqueness guarantee
    ///
    /// No token is issued on registration.
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::ValidationError(validation::describe(&e)))?;

        let password = request.password;
        let password_hash =
            tokio::task::spawn_blocking(move || PasswordService::hash_password(&password))
                .await
                .map_err(|e| AuthError::PasswordHashError(e.to_string()))??;

        let user = self.users.create(&request.email, &password_hash).await?;
        tracing::info!("Registered user with id: {}", user.id);

        Ok(RegisterResponse {
            username: user.email,
            message: "User registered successfully".to_string(),
        })
    }

    /// Login a user and issue an access token
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, AuthError> {
        let user = self.users.find_by_email(email).await?;
        let password = password.to_string();

        let verified = match user {
            Some(user) => {
                let hash = user.password_hash.clone();
                let ok = tokio::task::spawn_blocking(move || {
                    PasswordService::verify_password(&password, &hash)
                })
                .await
                .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;
                ok.then_some(user)
            }
            None => {
                tokio::task::spawn_blocking(move || PasswordService::verify_against_dummy(&password))
                    .await
                    .map_err(|e| AuthError::PasswordHashError(e.to_string()))?;
                None
            }
        };

        let user = verified.ok_or(AuthError::InvalidCredentials)?;
        let access_token = self.token_service.issue(user.id)?;
        tracing::info!("User {} logged in", user.id);

        Ok(TokenResponse::bearer(access_token))
    }

    /// Resolve the user a bearer token belongs to
    ///
    /// A token whose subject no longer exists is reported exactly like an
    /// invalid token.
    pub async fn resolve_current_user(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.token_service.verify(token)?;
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidToken)
    }

    /// Token service used by this gateway
    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }
}
