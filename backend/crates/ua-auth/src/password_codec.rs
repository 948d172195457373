use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use error_location::ErrorLocation;

/// Salted Argon2id password hashing.
///
/// Output is a self-describing PHC string (`$argon2id$v=19$...`), so the
/// parameters travel with each stored hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordCodec;

impl PasswordCodec {
    pub fn new() -> Self {
        Self
    }

    #[track_caller]
    pub fn hash(&self, password: &str) -> AuthErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// True only if `hash` is a well-formed PHC string and `password` matches it.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
