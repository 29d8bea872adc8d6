/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including repository selection, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL when `DATABASE_URL` is configured
 * 2. Build the hasher and token service from the security settings
 * 3. Create the router with CORS and request tracing
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::error::BackendError;
use crate::backend::repository::{PgRepository, PosRepository};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Returns an error when the security settings cannot be turned into a
/// working hasher. Database problems are not errors; the server starts
/// without persistence and data endpoints answer 503.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing point-of-sale auth server");

    let repository: Option<Arc<dyn PosRepository>> = match &config.database_url {
        Some(url) => load_database(url)
            .await
            .map(|pool| Arc::new(PgRepository::new(pool)) as Arc<dyn PosRepository>),
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            None
        }
    };

    let app_state = AppState::new(config, repository)?;
    tracing::info!(
        "Security configured: {:?}, bcrypt cost {}",
        app_state.tokens,
        app_state.hasher.cost()
    );

    Ok(create_router(app_state, &config.cors_origins))
}
