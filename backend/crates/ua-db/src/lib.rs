pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::auth_identity_repository::AuthIdentityRepository;
pub use repositories::user_repository::{UserRepository, UserWithPasswordHash};

/// Embedded schema migrations, applied at server startup and by the test pools
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
