pub mod auth_identity_repository;
pub mod user_repository;
