use crate::{
    ApiError, AppState, health, login, list_users, me, oauth_callback, profile, request_logging,
    signup, token_demo,
};

use std::panic::Location;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use error_location::ErrorLocation;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/ping", get(health::ping))
        .route("/ping/{name}", get(health::ping_name))
        // Auth
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/oauth/callback", post(oauth_callback))
        .route("/auth/me", get(me))
        .route("/auth/token-demo", get(token_demo))
        .route("/me/profile", get(profile))
        // Users (POST kept as a signup alias)
        .route("/users", get(list_users).post(signup))
        .fallback(route_not_found)
        .with_state(state)
        .layer(middleware::from_fn(request_logging::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound {
        message: "route not found".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
