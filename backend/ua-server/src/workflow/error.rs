use ua_core::CoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Outcomes of the auth workflow that are not success.
///
/// `Internal` keeps the underlying detail for logging; only `message` is shown to callers.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Validation failed on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Email already exists {location}")]
    EmailExists { location: ErrorLocation },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Internal error: {message}: {detail} {location}")]
    Internal {
        message: &'static str,
        detail: String,
        location: ErrorLocation,
    },
}

impl WorkflowError {
    #[track_caller]
    pub(crate) fn internal(message: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            message,
            detail: detail.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn user_not_found() -> Self {
        Self::NotFound {
            message: "user not found".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for WorkflowError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        Self::Validation {
            field: e.field(),
            message: e.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
