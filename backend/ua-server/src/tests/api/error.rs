use crate::ApiError;
use crate::workflow::WorkflowError;

use ua_auth::AuthError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "invalid email".into(),
        field: Some("email".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "invalid email");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_bad_request_omits_field() {
    let error = ApiError::BadRequest {
        message: "invalid request body".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_invalid_credentials_returns_401_generic_message() {
    let error = ApiError::InvalidCredentials {
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "invalid email or password");
}

#[tokio::test]
async fn test_email_exists_returns_409() {
    let error = ApiError::EmailExists {
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "EMAIL_EXISTS");
}

#[tokio::test]
async fn test_not_found_returns_404() {
    let error = ApiError::NotFound {
        message: "user not found".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["message"], "user not found");
}

#[tokio::test]
async fn test_internal_workflow_error_hides_detail() {
    let error: ApiError = WorkflowError::Internal {
        message: "failed to create user",
        detail: "UNIQUE constraint failed: secret_table.column".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "failed to create user");
    assert!(!json.to_string().contains("secret_table"));
}

#[tokio::test]
async fn test_workflow_validation_keeps_field() {
    let error: ApiError = WorkflowError::Validation {
        field: "password",
        message: "password is required".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["field"], "password");
}

#[tokio::test]
async fn test_every_token_failure_collapses_to_unauthorized() {
    let failures = vec![
        AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::TokenExpired {
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::InvalidClaim {
            claim: "email".into(),
            message: "email cannot be empty".into(),
            location: ErrorLocation::from(Location::caller()),
        },
    ];

    for failure in failures {
        let (status, json) = body_json(failure.into()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_hashing_failure_is_internal_not_unauthorized() {
    let error: ApiError = AuthError::PasswordHash {
        message: "out of memory".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    let (status, _) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
