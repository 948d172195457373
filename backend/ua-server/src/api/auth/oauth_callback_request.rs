use crate::workflow::OAuthCallbackInput;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackRequest {
    #[serde(default)]
    pub provider: String,

    #[serde(default)]
    pub provider_account_id: String,

    #[serde(default)]
    pub email: String,

    /// Display name; empty means none
    #[serde(default)]
    pub name: String,
}

impl From<OAuthCallbackRequest> for OAuthCallbackInput {
    fn from(req: OAuthCallbackRequest) -> Self {
        Self {
            provider: req.provider,
            provider_account_id: req.provider_account_id,
            email: req.email,
            name: req.name,
        }
    }
}
