pub mod auth;
pub mod credentials_request;
pub mod login_response;
pub mod oauth_callback_request;
pub mod oauth_callback_response;
pub mod profile_response;
pub mod token_response;
