//! Auth REST API handlers

use crate::{
    ApiResult, AppState, AuthUser, CredentialsRequest, LoginResponse, OAuthCallbackRequest,
    OAuthCallbackResponse, ProfileResponse, TokenResponse,
};

use ua_core::User;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

/// POST /auth/signup (also POST /users)
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let Json(req) = payload?;

    let user = state.workflow.signup(&req.email, &req.password).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;

    let outcome = state.workflow.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        user: outcome.user,
    }))
}

/// POST /auth/oauth/callback
///
/// 201 when the identity was linked by this call, 200 when it already existed.
pub async fn oauth_callback(
    State(state): State<AppState>,
    payload: Result<Json<OAuthCallbackRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OAuthCallbackResponse>)> {
    let Json(req) = payload?;

    let outcome = state.workflow.oauth_callback(req.into()).await?;

    let status = if outcome.is_new_user {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into())))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> ApiResult<Json<User>> {
    let user = state.workflow.me(&identity).await?;

    Ok(Json(user))
}

/// GET /me/profile
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state.workflow.profile(&identity).await?;

    Ok(Json(profile.into()))
}

/// GET /auth/token-demo
pub async fn token_demo(State(state): State<AppState>) -> ApiResult<Json<TokenResponse>> {
    let token = state.workflow.token_demo()?;

    Ok(Json(TokenResponse { token }))
}
