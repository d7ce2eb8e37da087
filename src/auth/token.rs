// JWT access token issuance and verification

use crate::auth::error::AuthError;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub iat: i64,    // issued at timestamp
    pub exp: i64,    // absolute expiration timestamp
}

/// Token service for JWT operations
///
/// Keys are derived once from the process-wide secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
}

impl TokenService {
    /// Create a new TokenService with secret key and access token lifetime
    pub fn new(secret: &str, access_token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_ttl,
        }
    }

    /// Configured access token lifetime
    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    /// Issue an access token for `user_id` with the configured lifetime
    pub fn issue(&self, user_id: i32) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, self.access_token_ttl)
    }

    /// Issue an access token expiring `ttl` from now
    pub fn issue_with_ttl(&self, user_id: i32, ttl: Duration) -> Result<String, AuthError> {
        self.issue_at(user_id, ttl, Utc::now())
    }

    /// Issue an access token as if minted at `issued_at`
    pub fn issue_at(
        &self,
        user_id: i32,
        ttl: Duration,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token and return the subject user id
    ///
    /// Every failure (bad structure, bad signature, expired, non-numeric
    /// subject) maps to the same `InvalidToken` outcome.
    pub fn verify(&self, token: &str) -> Result<i32, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e.kind());
            AuthError::InvalidToken
        })?;

        // `exp` has whole-second precision; the second it names counts as expired
        if data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token rejected: expired at {}", data.claims.exp);
            return Err(AuthError::InvalidToken);
        }

        data.claims.sub.parse::<i32>().map_err(|_| AuthError::InvalidToken)
    }
}
