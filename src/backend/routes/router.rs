/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` - request/response logging through `tracing`
 * - `CorsLayer` - browser access for the configured frontend origins
 */

use axum::{http::StatusCode, response::IntoResponse, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_api_routes, configure_protected_routes};
use crate::backend::server::config::cors_layer;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state
/// * `cors_origins` - Origins allowed to call the API from a browser
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router<()> {
    let router = configure_api_routes(Router::new());
    let router = configure_protected_routes(router, &app_state);

    router
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(app_state)
}

async fn fallback() -> impl IntoResponse {
    BackendError::handler(StatusCode::NOT_FOUND, "Not Found")
}
