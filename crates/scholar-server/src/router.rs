use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app_state::AppState;
use crate::handlers;

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness probe
        .route("/health", get(handlers::health))
        // JSON-RPC tool gateway
        .route("/rpc", post(handlers::rpc))
        // CORS: allow any origin (callers may run in various local contexts)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
