// Request extractors resolving the caller's identity from a bearer token

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::auth::{error::AuthError, service::AuthService};

/// Whether task routes demand an authenticated caller
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy {
    pub tasks_require_auth: bool,
}

/// Authenticated user extractor for protected routes
///
/// Rejects with 401 when the header is missing, malformed, the token is
/// invalid or expired, or the user no longer exists.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
}

/// Extract the bearer token from the Authorization header
///
/// `Ok(None)` when there is no header at all; any other unusable header
/// is an authentication failure.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidToken)?;
    let (scheme, token) = value.split_once(' ').ok_or(AuthError::InvalidToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::InvalidToken);
    }

    Ok(Some(token.trim()))
}

async fn authenticate(service: &AuthService, token: &str) -> Result<AuthenticatedUser, AuthError> {
    let user = service.resolve_current_user(token).await?;
    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.ok_or_else(|| {
            warn!("Missing Authorization header for protected endpoint: {}", parts.uri.path());
            AuthError::InvalidToken
        })?;

        let service = AuthService::from_ref(state);
        authenticate(&service, token).await
    }
}

/// Identity attached to a request on routes where authentication is optional
///
/// Anonymous when no Authorization header is sent. A header that is sent
/// but does not resolve to a user is still rejected.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<AuthenticatedUser>);

impl RequestIdentity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user_id(&self) -> Option<i32> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestIdentity
where
    AuthService: FromRef<S>,
    AccessPolicy: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers)? {
            Some(token) => {
                let service = AuthService::from_ref(state);
                let user = authenticate(&service, token).await?;
                debug!("Request to {} by user {}", parts.uri.path(), user.user_id);
                Ok(RequestIdentity(Some(user)))
            }
            None if AccessPolicy::from_ref(state).tasks_require_auth => {
                warn!("Anonymous request rejected for endpoint: {}", parts.uri.path());
                Err(AuthError::InvalidToken)
            }
            None => Ok(RequestIdentity::anonymous()),
        }
    }
}
