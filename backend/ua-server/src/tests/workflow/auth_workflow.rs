use crate::workflow::{AuthWorkflow, OAuthCallbackInput, WorkflowError};

use ua_auth::{AuthenticatedUser, PasswordCodec, TokenService};

use std::sync::Arc;

use googletest::prelude::*;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn create_workflow() -> (AuthWorkflow, SqlitePool) {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    ua_db::MIGRATOR.run(&pool).await.unwrap();

    let tokens = Arc::new(TokenService::with_hs256(b"test-secret-key-at-least-32-bytes"));
    let workflow = AuthWorkflow::new(pool.clone(), tokens, PasswordCodec::new());

    (workflow, pool)
}

fn oauth_input(provider: &str, account: &str, email: &str, name: &str) -> OAuthCallbackInput {
    OAuthCallbackInput {
        provider: provider.to_string(),
        provider_account_id: account.to_string(),
        email: email.to_string(),
        name: name.to_string(),
    }
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn given_signup_when_stored_then_password_is_hashed_not_plaintext() {
    let (workflow, pool) = create_workflow().await;

    workflow.signup("hash@example.com", "password1").await.unwrap();

    let stored: String =
        sqlx::query_scalar("SELECT password_hash FROM users WHERE email = 'hash@example.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_that!(stored, starts_with("$argon2id$"));
    assert_that!(stored, not(contains_substring("password1")));
}

#[tokio::test]
async fn given_padded_password_when_signup_and_login_then_same_raw_password_required() {
    let (workflow, _pool) = create_workflow().await;
    workflow.signup("pad@example.com", " password1 ").await.unwrap();

    let trimmed = workflow.login("pad@example.com", "password1").await;
    let exact = workflow.login("pad@example.com", " password1 ").await;

    assert!(matches!(trimmed, Err(WorkflowError::InvalidCredentials { .. })));
    assert!(exact.is_ok());
}

#[tokio::test]
async fn given_duplicate_email_when_signup_then_email_exists() {
    let (workflow, _pool) = create_workflow().await;
    workflow.signup("dup@example.com", "password1").await.unwrap();

    let result = workflow.signup("DUP@example.com", "password1").await;

    assert!(matches!(result, Err(WorkflowError::EmailExists { .. })));
}

#[tokio::test]
async fn given_first_callback_when_resolved_then_user_and_identity_created_together() {
    let (workflow, pool) = create_workflow().await;

    let outcome = workflow
        .oauth_callback(oauth_input("google", "123", "x@y.com", "X"))
        .await
        .unwrap();

    assert!(outcome.is_new_user);
    assert_that!(count(&pool, "users").await, eq(1));
    assert_that!(count(&pool, "auth_identities").await, eq(1));
}

#[tokio::test]
async fn given_linked_identity_when_email_changes_at_provider_then_linked_user_returned() {
    let (workflow, pool) = create_workflow().await;
    let first = workflow
        .oauth_callback(oauth_input("google", "123", "old@example.com", ""))
        .await
        .unwrap();

    let second = workflow
        .oauth_callback(oauth_input("google", "123", "new@example.com", ""))
        .await
        .unwrap();

    assert!(!second.is_new_user);
    assert_that!(second.user.id, eq(first.user.id));
    assert_that!(second.user.email, eq("old@example.com"));
    assert_that!(count(&pool, "users").await, eq(1));
}

#[tokio::test]
async fn given_empty_provider_when_callback_then_bad_request() {
    let (workflow, pool) = create_workflow().await;

    let result = workflow
        .oauth_callback(oauth_input("", "123", "x@y.com", ""))
        .await;

    assert!(matches!(result, Err(WorkflowError::BadRequest { .. })));
    assert_that!(count(&pool, "users").await, eq(0));
}

#[tokio::test]
async fn given_padded_account_id_when_callback_then_separate_identity() {
    let (workflow, pool) = create_workflow().await;
    let plain = workflow
        .oauth_callback(oauth_input("google", "123", "x@y.com", ""))
        .await
        .unwrap();

    let padded = workflow
        .oauth_callback(oauth_input("google", " 123", "x@y.com", ""))
        .await
        .unwrap();

    assert!(padded.is_new_user);
    assert_that!(padded.user.id, eq(plain.user.id));
    assert_that!(count(&pool, "auth_identities").await, eq(2));
}

#[tokio::test]
async fn given_linked_identity_when_provider_sends_empty_email_then_linked_user_returned() {
    let (workflow, _pool) = create_workflow().await;
    let first = workflow
        .oauth_callback(oauth_input("github", "42", "x@y.com", ""))
        .await
        .unwrap();

    let second = workflow
        .oauth_callback(oauth_input("github", "42", "", ""))
        .await
        .unwrap();

    assert!(!second.is_new_user);
    assert_that!(second.user.id, eq(first.user.id));
    assert_that!(second.user.email, eq("x@y.com"));
}

#[tokio::test]
async fn given_identity_linked_concurrently_when_creating_then_upsert_rolled_back() {
    let (workflow, pool) = create_workflow().await;
    let winner = workflow
        .oauth_callback(oauth_input("github", "42", "winner@example.com", ""))
        .await
        .unwrap();

    // Same identity, different email: the lookup already happened elsewhere
    let outcome = workflow
        .create_and_link(&oauth_input("github", "42", "loser@example.com", "L"))
        .await
        .unwrap();

    assert!(!outcome.is_new_user);
    assert_that!(outcome.user.id, eq(winner.user.id));
    let loser: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'loser@example.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_that!(loser, eq(0));
    assert_that!(count(&pool, "users").await, eq(1));
}

#[tokio::test]
async fn given_conflicting_link_without_stored_identity_when_creating_then_internal() {
    let (workflow, pool) = create_workflow().await;
    // Silently drop identity inserts so the link reports a conflict that never resolves
    sqlx::query(
        "CREATE TRIGGER swallow_identities BEFORE INSERT ON auth_identities
         BEGIN SELECT RAISE(IGNORE); END",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = workflow
        .create_and_link(&oauth_input("github", "43", "ghost@example.com", ""))
        .await;

    assert!(matches!(result, Err(WorkflowError::Internal { .. })));
    assert_that!(count(&pool, "users").await, eq(0));
}

#[tokio::test]
async fn given_failing_link_when_callback_then_user_insert_rolled_back() {
    let (workflow, pool) = create_workflow().await;
    // Make the identity insert fail inside the transaction
    sqlx::query("DROP TABLE auth_identities")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE auth_identities (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            provider TEXT NOT NULL,
            provider_account_id TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            UNIQUE (provider, provider_account_id),
            CHECK (provider <> 'broken')
        )",
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = workflow
        .oauth_callback(oauth_input("broken", "1", "rollback@example.com", "R"))
        .await;

    assert!(matches!(result, Err(WorkflowError::Internal { .. })));
    assert_that!(count(&pool, "users").await, eq(0));
}

#[tokio::test]
async fn given_deleted_user_when_me_then_not_found() {
    let (workflow, _pool) = create_workflow().await;
    let identity = AuthenticatedUser {
        id: 404,
        email: "gone@example.com".to_string(),
    };

    let result = workflow.me(&identity).await;

    assert!(matches!(result, Err(WorkflowError::NotFound { .. })));
}

#[tokio::test]
async fn given_existing_user_when_profile_then_sample_bio() {
    let (workflow, _pool) = create_workflow().await;
    let user = workflow.signup("p@example.com", "password1").await.unwrap();
    let identity = AuthenticatedUser {
        id: user.id,
        email: user.email.clone(),
    };

    let profile = workflow.profile(&identity).await.unwrap();

    assert_that!(profile.id, eq(user.id));
    assert_that!(profile.bio, eq("This is a sample profile."));
}
