//! User entity - the identity record every login path resolves to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// The password hash is not part of this type; it is only read alongside the user
/// during login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Normalized (trimmed, lower-cased) email, unique across users
    pub email: String,
    /// Display name, absent for password signups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}
