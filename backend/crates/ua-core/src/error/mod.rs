use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error on '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Message intended for the caller, without the location suffix
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message.as_str(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Validation { field, .. } => *field,
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
