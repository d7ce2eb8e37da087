// Password hashing and verification service

use std::sync::OnceLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::auth::error::AuthError;

/// Password service for hashing and verification
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using Argon2id with a fresh random salt
    ///
    /// Returns a PHC string (`$argon2id$v=19$...`) embedding the salt and parameters.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHashError(e.to_string()))
    }

    /// Verify a password against a stored hash
    ///
    /// A malformed hash is a verification failure, not an error.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// Spend the same work as a real verification against a throwaway hash
    ///
    /// Used when the account does not exist so login latency does not reveal it.
    pub fn verify_against_dummy(password: &str) {
        static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
        let dummy = DUMMY_HASH.get_or_init(|| Self::hash_password("dummy-password-for-timing").ok());
        if let Some(hash) = dummy {
            let _ = Self::verify_password(password, hash);
        }
    }
}
