use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Minimum password length in bytes (after trimming)
pub const MIN_PASSWORD_BYTES: usize = 8;

/// Maximum password length in bytes (after trimming). Longer inputs are rejected
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Check the password shape. Does not touch any stored hash.
#[track_caller]
pub fn validate_password(password: &str) -> CoreErrorResult<()> {
    let trimmed = password.trim();

    let message = if trimmed.is_empty() {
        "password is required".to_string()
    } else if trimmed.len() < MIN_PASSWORD_BYTES {
        format!("password must be at least {MIN_PASSWORD_BYTES} characters")
    } else if trimmed.len() > MAX_PASSWORD_BYTES {
        format!("password must be at most {MAX_PASSWORD_BYTES} characters")
    } else {
        return Ok(());
    };

    Err(CoreError::Validation {
        field: "password",
        message,
        location: ErrorLocation::from(Location::caller()),
    })
}
