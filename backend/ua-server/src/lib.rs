pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod request_logging;
pub mod routes;
pub mod workflow;


pub use api::{
    auth::{
        auth::{login, me, oauth_callback, profile, signup, token_demo},
        credentials_request::CredentialsRequest,
        login_response::LoginResponse,
        oauth_callback_request::OAuthCallbackRequest,
        oauth_callback_response::OAuthCallbackResponse,
        profile_response::ProfileResponse,
        token_response::TokenResponse,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::auth_user::AuthUser,
    users::users::list_users,
};
pub use app_state::AppState;

pub use crate::routes::build_router;
