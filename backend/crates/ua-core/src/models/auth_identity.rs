//! Link between a user and an external OAuth provider account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `(provider, provider_account_id)` is unique; rows are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthIdentity {
    pub user_id: i64,
    pub provider: String,
    pub provider_account_id: String,
    pub created_at: DateTime<Utc>,
}
