//! API routes for factory-cloud

pub mod health;

use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

/// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/detailed", get(health::health_detailed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
