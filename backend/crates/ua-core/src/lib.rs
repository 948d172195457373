pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::auth_identity::AuthIdentity;
pub use models::user::User;
pub use validation::email::{mask_email, normalize_email, validate_email};
pub use validation::password::{MAX_PASSWORD_BYTES, MIN_PASSWORD_BYTES, validate_password};
