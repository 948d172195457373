use crate::{DbError, error::Result as DbErrorResult};

use ua_core::AuthIdentity;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

#[derive(sqlx::FromRow)]
struct AuthIdentityRow {
    user_id: i64,
    provider: String,
    provider_account_id: String,
    created_at: i64,
}

impl AuthIdentityRow {
    #[track_caller]
    fn into_identity(self) -> DbErrorResult<AuthIdentity> {
        let created_at =
            DateTime::from_timestamp(self.created_at, 0).ok_or_else(|| DbError::InvalidRow {
                table: "auth_identities",
                message: format!("created_at out of range: {}", self.created_at),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(AuthIdentity {
            user_id: self.user_id,
            provider: self.provider,
            provider_account_id: self.provider_account_id,
            created_at,
        })
    }
}

pub struct AuthIdentityRepository;

impl AuthIdentityRepository {
    /// Identity stored under `(provider, provider_account_id)`, if any.
    ///
    /// Both values are matched exactly as given.
    pub async fn find<'e, E>(
        executor: E,
        provider: &str,
        provider_account_id: &str,
    ) -> DbErrorResult<Option<AuthIdentity>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, AuthIdentityRow>(
            r#"
                SELECT user_id, provider, provider_account_id, created_at
                FROM auth_identities
                WHERE provider = ? AND provider_account_id = ?
                "#,
        )
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(executor)
        .await?;

        row.map(AuthIdentityRow::into_identity).transpose()
    }

    /// Link an identity to a user. Returns `false` if the pair was already linked.
    pub async fn link<'e, E>(
        executor: E,
        user_id: i64,
        provider: &str,
        provider_account_id: &str,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO auth_identities (user_id, provider, provider_account_id, created_at)
                VALUES (?, ?, ?, ?)
                ON CONFLICT (provider, provider_account_id) DO NOTHING
                "#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(provider_account_id)
        .bind(created_at)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
