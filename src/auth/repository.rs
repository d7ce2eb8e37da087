// Credential store: persistence for user accounts

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};

/// Storage boundary for user credentials
///
/// Email uniqueness is enforced by the store itself, so concurrent
/// registrations of the same email yield exactly one success.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user; fails with `EmailAlreadyRegistered` on an exact email match
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError>;
}

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgUserRepository {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, AuthError> {
        // A single INSERT guarded by the UNIQUE constraint closes the
        // check-then-insert race
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO todo_db.users (email, password_hash) VALUES ($1, $2) RETURNING id, email, password_hash, created_at"
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Check for unique constraint violation
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyRegistered;
                }
            }
            AuthError::DatabaseError(e)
        })?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM todo_db.users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM todo_db.users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
