//! REST API error types
//!
//! These errors are designed to produce consistent JSON responses
//! with appropriate HTTP status codes.

use crate::workflow::WorkflowError;

use ua_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Field validation failed (400)
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Malformed or incomplete request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Missing or unverifiable bearer token (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Login rejected (401)
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Signup for a registered email (409)
    #[error("Email already exists {location}")]
    EmailExists { location: ErrorLocation },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } | Self::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
            Self::EmailExists { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::EmailExists { .. } => "EMAIL_EXISTS",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let (message, field) = match self {
            ApiError::Validation { message, field, .. } => (message, field),
            ApiError::BadRequest { message, .. }
            | ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Internal { message, .. } => (message, None),
            ApiError::InvalidCredentials { .. } => ("invalid email or password".to_string(), None),
            ApiError::EmailExists { .. } => ("email already exists".to_string(), None),
        };

        let body = ApiErrorBody {
            code: code.into(),
            message,
            field,
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert workflow outcomes to API errors
impl From<WorkflowError> for ApiError {
    #[track_caller]
    fn from(e: WorkflowError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        // Detail stays in the log; callers only see the generic message
        if matches!(e, WorkflowError::Internal { .. }) {
            log::error!("{}", e);
        }

        match e {
            WorkflowError::Validation { field, message, .. } => ApiError::Validation {
                message,
                field: Some(field.to_string()),
                location,
            },
            WorkflowError::BadRequest { message, .. } => ApiError::BadRequest { message, location },
            WorkflowError::InvalidCredentials { .. } => ApiError::InvalidCredentials { location },
            WorkflowError::EmailExists { .. } => ApiError::EmailExists { location },
            WorkflowError::NotFound { message, .. } => ApiError::NotFound { message, location },
            WorkflowError::Internal { message, .. } => ApiError::Internal {
                message: message.to_string(),
                location,
            },
        }
    }
}

/// Convert token and header failures to a single 401
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if !e.is_unauthenticated() {
            log::error!("Auth error: {}", e);
            return ApiError::Internal {
                message: "internal server error".to_string(),
                location,
            };
        }

        log::debug!("Rejected bearer token ({}): {}", e.error_code(), e);

        let message = match e {
            AuthError::MissingHeader { .. } | AuthError::InvalidScheme { .. } => {
                "missing or invalid Authorization header"
            }
            _ => "invalid or expired token",
        };

        ApiError::Unauthorized {
            message: message.to_string(),
            location,
        }
    }
}

/// Unparseable JSON bodies
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest {
            message: "invalid request body".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
