use crate::workflow::AuthWorkflow;

use ua_auth::{PasswordCodec, TokenService};

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub workflow: AuthWorkflow,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenService) -> Self {
        let tokens = Arc::new(tokens);
        let workflow = AuthWorkflow::new(pool.clone(), tokens.clone(), PasswordCodec::new());

        Self {
            pool,
            tokens,
            workflow,
        }
    }
}
