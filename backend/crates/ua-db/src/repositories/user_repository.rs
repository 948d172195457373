use crate::{DbError, error::Result as DbErrorResult};

use ua_core::User;

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;

/// A user together with the stored password hash (absent for OAuth-only accounts)
#[derive(Debug, Clone)]
pub struct UserWithPasswordHash {
    pub user: User,
    pub password_hash: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    name: Option<String>,
    created_at: i64,
}

#[derive(sqlx::FromRow)]
struct UserWithHashRow {
    id: i64,
    email: String,
    name: Option<String>,
    created_at: i64,
    password_hash: Option<String>,
}

impl UserRow {
    #[track_caller]
    fn into_user(self) -> DbErrorResult<User> {
        Ok(User {
            id: self.id,
            email: self.email,
            name: self.name,
            created_at: timestamp_to_datetime(self.created_at)?,
        })
    }
}

#[track_caller]
fn timestamp_to_datetime(ts: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| DbError::InvalidRow {
        table: "users",
        message: format!("created_at out of range: {ts}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

pub struct UserRepository;

impl UserRepository {
    /// Insert a password account. `email` must already be normalized.
    ///
    /// Returns `DbError::DuplicateEmail` when the address is taken.
    pub async fn insert<'e, E>(
        executor: E,
        email: &str,
        password_hash: &str,
    ) -> DbErrorResult<User>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let created_at = Utc::now().timestamp();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (email, password_hash, created_at)
                VALUES (?, ?, ?)
                RETURNING id, email, name, created_at
                "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(created_at)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            let is_unique_violation = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());

            if is_unique_violation {
                DbError::DuplicateEmail {
                    email: email.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::from(e)
            }
        })?;

        row.into_user()
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> DbErrorResult<Option<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, name, created_at
                FROM users
                WHERE id = ?
                "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    /// Lookup for login. `email` must already be normalized.
    pub async fn find_by_email_with_hash<'e, E>(
        executor: E,
        email: &str,
    ) -> DbErrorResult<Option<UserWithPasswordHash>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, UserWithHashRow>(
            r#"
                SELECT id, email, name, created_at, password_hash
                FROM users
                WHERE email = ?
                "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        match row {
            Some(r) => Ok(Some(UserWithPasswordHash {
                user: User {
                    id: r.id,
                    email: r.email,
                    name: r.name,
                    created_at: timestamp_to_datetime(r.created_at)?,
                },
                password_hash: r.password_hash,
            })),
            None => Ok(None),
        }
    }

    /// Create the user for `email` or return the existing one.
    ///
    /// A stored name is never overwritten; `name` only fills a NULL.
    pub async fn upsert_by_email<'e, E>(
        executor: E,
        email: &str,
        name: Option<&str>,
    ) -> DbErrorResult<User>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let created_at = Utc::now().timestamp();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (email, name, created_at)
                VALUES (?, ?, ?)
                ON CONFLICT (email) DO UPDATE
                    SET name = COALESCE(users.name, excluded.name)
                RETURNING id, email, name, created_at
                "#,
        )
        .bind(email)
        .bind(name)
        .bind(created_at)
        .fetch_one(executor)
        .await?;

        row.into_user()
    }

    /// All users in ascending id order
    pub async fn list_all<'e, E>(executor: E) -> DbErrorResult<Vec<User>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, email, name, created_at
                FROM users
                ORDER BY id ASC
                "#,
        )
        .fetch_all(executor)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}
