//! User directory handlers

use crate::{ApiResult, AppState};

use ua_core::User;

use axum::{Json, extract::State};

/// GET /users
///
/// All users in id order; an empty directory is `[]`.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.workflow.list_users().await?;

    Ok(Json(users))
}
