// HTTP handlers for authentication endpoints

use axum::{extract::State, Form, Json};

use crate::app::AppState;
use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{LoginForm, RegisterRequest, RegisterResponse, TokenResponse, UserResponse},
};
use crate::error::ErrorResponse;

/// Register a new user
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Email already registered or invalid input", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AuthError> {
    let response = state.auth.register(request).await?;
    Ok(Json(response))
}

/// Login a user
/// POST /auth/login (form-encoded `username` and `password`)
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, AuthError> {
    let response = state.auth.login(&form.username, &form.password).await?;
    Ok(Json(response))
}

/// Get current user information (protected endpoint)
/// GET /auth/me
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Authenticated user", body = UserResponse),
        (status = 401, description = "Invalid authentication credentials", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "auth"
)]
pub async fn me_handler(user: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id,
        email: user.email,
    })
}
