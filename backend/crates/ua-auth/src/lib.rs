pub mod authenticated_user;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod password_codec;
pub mod token_service;

pub use authenticated_user::AuthenticatedUser;
pub use bearer::bearer_token;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use password_codec::PasswordCodec;
pub use token_service::{DEFAULT_TOKEN_TTL_HOURS, TokenService};
