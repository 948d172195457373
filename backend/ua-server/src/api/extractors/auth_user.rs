//! Bearer-token gate for protected routes

use crate::{ApiError, AppState};

use ua_auth::{AuthenticatedUser, bearer_token};

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Verified identity of the caller.
///
/// Rejects with 401 when the `Authorization` header is missing, is not
/// `Bearer <token>`, or the token fails verification for any reason.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // A header that is not valid UTF-8 is treated as absent
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let token = bearer_token(header)?;
            let claims = state.tokens.verify(token)?;

            Ok(AuthUser(AuthenticatedUser::from_claims(claims)))
        }
    }
}
