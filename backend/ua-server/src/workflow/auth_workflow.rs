//! Signup, login, OAuth linking and current-user resolution.
//!
//! Each call is independent; the only shared state is the pool and the
//! read-only token service.

use crate::workflow::{
    LoginOutcome, OAuthCallbackInput, OAuthOutcome, Profile, Result as WorkflowResult,
    WorkflowError,
};

use ua_auth::{AuthenticatedUser, PasswordCodec, TokenService};
use ua_core::{User, mask_email, normalize_email, validate_email, validate_password};
use ua_db::{AuthIdentityRepository, DbError, UserRepository};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use sqlx::SqlitePool;

const DEMO_USER_ID: i64 = 1;
const DEMO_USER_EMAIL: &str = "demo@example.com";
const PROFILE_BIO: &str = "This is a sample profile.";

#[derive(Clone)]
pub struct AuthWorkflow {
    pool: SqlitePool,
    tokens: Arc<TokenService>,
    passwords: PasswordCodec,
}

impl AuthWorkflow {
    pub fn new(pool: SqlitePool, tokens: Arc<TokenService>, passwords: PasswordCodec) -> Self {
        Self {
            pool,
            tokens,
            passwords,
        }
    }

    /// Create a password account. Returns the stored user.
    pub async fn signup(&self, email: &str, password: &str) -> WorkflowResult<User> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let hash = self.hash_password(password).await?;

        match UserRepository::insert(&self.pool, &email, &hash).await {
            Ok(user) => {
                info!("User {} signed up ({})", user.id, mask_email(&user.email));
                Ok(user)
            }
            Err(DbError::DuplicateEmail { .. }) => {
                debug!("Signup rejected, email taken ({})", mask_email(&email));
                Err(WorkflowError::EmailExists {
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(WorkflowError::internal("failed to create user", e)),
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email, OAuth-only account and wrong password all yield
    /// `InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> WorkflowResult<LoginOutcome> {
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let found = UserRepository::find_by_email_with_hash(&self.pool, &email)
            .await
            .map_err(|e| WorkflowError::internal("failed to login", e))?;

        let Some(found) = found else {
            debug!("Login failed, no such user ({})", mask_email(&email));
            return Err(Self::invalid_credentials());
        };

        let Some(hash) = found.password_hash else {
            debug!("Login failed, user {} has no password", found.user.id);
            return Err(Self::invalid_credentials());
        };

        if !self.verify_password(password, hash).await? {
            debug!("Login failed, wrong password for user {}", found.user.id);
            return Err(Self::invalid_credentials());
        }

        let token = self
            .tokens
            .issue(found.user.id, &found.user.email)
            .map_err(|e| WorkflowError::internal("failed to generate token", e))?;

        info!("User {} logged in", found.user.id);

        Ok(LoginOutcome {
            token,
            user: found.user,
        })
    }

    /// Resolve an external identity to a local user, creating and linking one if needed.
    ///
    /// Provider values are stored exactly as received. The email is only normalized;
    /// an already linked identity resolves whatever email the provider now reports.
    pub async fn oauth_callback(&self, input: OAuthCallbackInput) -> WorkflowResult<OAuthOutcome> {
        if input.provider.is_empty() || input.provider_account_id.is_empty() {
            return Err(WorkflowError::BadRequest {
                message: "provider and provider_account_id are required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identity =
            AuthIdentityRepository::find(&self.pool, &input.provider, &input.provider_account_id)
                .await
                .map_err(|e| WorkflowError::internal("failed to check auth identity", e))?;

        if let Some(identity) = identity {
            return self.existing_identity(identity.user_id).await;
        }

        self.create_and_link(&input).await
    }

    /// Upsert the user by email and link the identity in one transaction.
    ///
    /// If the identity was linked by someone else in the meantime, the upsert is
    /// rolled back and the already linked user is returned.
    pub(crate) async fn create_and_link(
        &self,
        input: &OAuthCallbackInput,
    ) -> WorkflowResult<OAuthOutcome> {
        let provider = input.provider.as_str();
        let provider_account_id = input.provider_account_id.as_str();
        let email = normalize_email(&input.email);
        let name = Some(input.name.as_str()).filter(|n| !n.trim().is_empty());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| WorkflowError::internal("failed to create user", e))?;

        let user = UserRepository::upsert_by_email(&mut *tx, &email, name)
            .await
            .map_err(|e| WorkflowError::internal("failed to create user", e))?;

        let linked =
            AuthIdentityRepository::link(&mut *tx, user.id, provider, provider_account_id)
                .await
                .map_err(|e| WorkflowError::internal("failed to create auth identity", e))?;

        if !linked {
            // Lost a race with a concurrent callback for the same identity.
            tx.rollback()
                .await
                .map_err(|e| WorkflowError::internal("failed to create user", e))?;
            warn!("Identity {provider}/{provider_account_id} linked concurrently, resolving");

            let identity =
                AuthIdentityRepository::find(&self.pool, provider, provider_account_id)
                    .await
                    .map_err(|e| WorkflowError::internal("failed to check auth identity", e))?
                    .ok_or_else(|| {
                        WorkflowError::internal(
                            "failed to create auth identity",
                            "identity vanished after conflict",
                        )
                    })?;

            return self.existing_identity(identity.user_id).await;
        }

        tx.commit()
            .await
            .map_err(|e| WorkflowError::internal("failed to create user", e))?;

        info!(
            "Linked {provider} identity to user {} ({})",
            user.id,
            mask_email(&user.email)
        );

        Ok(OAuthOutcome {
            user,
            is_new_user: true,
        })
    }

    /// Current user row for a verified token.
    pub async fn me(&self, identity: &AuthenticatedUser) -> WorkflowResult<User> {
        UserRepository::find_by_id(&self.pool, identity.id)
            .await
            .map_err(|e| WorkflowError::internal("failed to fetch user", e))?
            .ok_or_else(WorkflowError::user_not_found)
    }

    pub async fn profile(&self, identity: &AuthenticatedUser) -> WorkflowResult<Profile> {
        let user = self.me(identity).await?;

        Ok(Profile {
            id: user.id,
            email: user.email,
            bio: PROFILE_BIO,
        })
    }

    /// Token for a fixed demo identity. Not an authentication path.
    pub fn token_demo(&self) -> WorkflowResult<String> {
        self.tokens
            .issue(DEMO_USER_ID, DEMO_USER_EMAIL)
            .map_err(|e| WorkflowError::internal("failed to generate token", e))
    }

    pub async fn list_users(&self) -> WorkflowResult<Vec<User>> {
        UserRepository::list_all(&self.pool)
            .await
            .map_err(|e| WorkflowError::internal("failed to fetch users", e))
    }

    async fn existing_identity(&self, user_id: i64) -> WorkflowResult<OAuthOutcome> {
        let user = UserRepository::find_by_id(&self.pool, user_id)
            .await
            .map_err(|e| WorkflowError::internal("failed to fetch user", e))?
            .ok_or_else(|| {
                error!("Auth identity points at missing user {user_id}");
                WorkflowError::internal("failed to fetch user", "linked user missing")
            })?;

        Ok(OAuthOutcome {
            user,
            is_new_user: false,
        })
    }

    async fn hash_password(&self, password: &str) -> WorkflowResult<String> {
        let codec = self.passwords;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || codec.hash(&password))
            .await
            .map_err(|e| WorkflowError::internal("failed to hash password", e))?
            .map_err(|e| WorkflowError::internal("failed to hash password", e))
    }

    async fn verify_password(&self, password: &str, hash: String) -> WorkflowResult<bool> {
        let codec = self.passwords;
        let password = password.to_string();

        tokio::task::spawn_blocking(move || codec.verify(&password, &hash))
            .await
            .map_err(|e| WorkflowError::internal("failed to login", e))
    }

    #[track_caller]
    fn invalid_credentials() -> WorkflowError {
        WorkflowError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
