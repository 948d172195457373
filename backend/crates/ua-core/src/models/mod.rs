pub mod auth_identity;
pub mod user;
