use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS,
    MIN_TOKEN_TTL_HOURS, RECOMMENDED_JWT_SECRET_LENGTH,
};

use log::warn;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing secret (never logged)
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = match self.jwt_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => secret,
            _ => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set JWT_SECRET)",
                ));
            }
        };

        if secret.len() < RECOMMENDED_JWT_SECRET_LENGTH {
            warn!(
                "auth.jwt_secret is shorter than {} bytes; use a longer secret in production",
                RECOMMENDED_JWT_SECRET_LENGTH
            );
        }

        if !(MIN_TOKEN_TTL_HOURS..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(ConfigError::auth(format!(
                "auth.token_ttl_hours must be {}-{}, got {}",
                MIN_TOKEN_TTL_HOURS, MAX_TOKEN_TTL_HOURS, self.token_ttl_hours
            )));
        }

        Ok(())
    }

    /// Secret bytes for the token service. Only meaningful after `validate()`.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_deref().unwrap_or_default().as_bytes()
    }
}
