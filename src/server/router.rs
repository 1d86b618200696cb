use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{self, AppState};

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // The dashboard frontend is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/usage", get(handlers::get_usage))
        .route("/health", get(handlers::health_check))
        .layer(cors)
        .with_state(state)
}
