use crate::workflow::OAuthOutcome;

use ua_core::User;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct OAuthCallbackResponse {
    pub user: User,
    pub is_new_user: bool,
}

impl From<OAuthOutcome> for OAuthCallbackResponse {
    fn from(outcome: OAuthOutcome) -> Self {
        Self {
            user: outcome.user,
            is_new_user: outcome.is_new_user,
        }
    }
}
