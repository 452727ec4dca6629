use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::api_keys;
use super::gate;
use super::health;
use super::middleware::{logging_middleware, security_headers_middleware};
use super::state::AppState;
use super::validate;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Key management API
        .nest("/api", create_api_router())
        // Gate pages
        .route(
            gate::PLAYGROUND_PATH,
            get(gate::playground_page).post(gate::submit_playground),
        )
        .route(gate::PROTECTED_PATH, get(gate::protected_page))
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api-keys",
            get(api_keys::list_api_keys).post(api_keys::create_api_key),
        )
        .route(
            "/api-keys/{id}",
            get(api_keys::get_api_key)
                .patch(api_keys::update_api_key)
                .delete(api_keys::delete_api_key),
        )
        .route("/api-keys/{id}/rotate", post(api_keys::rotate_api_key))
        .route("/validate-api-key", post(validate::validate_api_key))
        .route("/diagnostics", get(health::diagnostics))
}
