use serde::Deserialize;

/// Body of signup and login
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}
