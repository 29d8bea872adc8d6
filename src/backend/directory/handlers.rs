/**
 * Directory Handlers
 *
 * Store and user listings for the sign-in screen. Responses never include
 * password hashes.
 *
 * Users are not linked to stores in the schema, so `/usuarios` lists every
 * active user once the requested store is known to exist.
 */

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::models::{Store, UserSummary};

/// Health response
#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Store list response
#[derive(Serialize, Deserialize, Debug)]
pub struct StoresResponse {
    pub ok: bool,
    #[serde(rename = "tiendas")]
    pub stores: Vec<Store>,
}

/// User list response
#[derive(Serialize, Deserialize, Debug)]
pub struct UsersResponse {
    pub ok: bool,
    #[serde(rename = "usuarios")]
    pub users: Vec<UserSummary>,
}

/// Query string of `/usuarios`
#[derive(Deserialize, Debug)]
pub struct UsersQuery {
    #[serde(rename = "tienda_id")]
    pub store_id: Option<String>,
}

/// Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// List all stores
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<StoresResponse>, BackendError> {
    let stores = state.repository()?.list_stores().await?;
    tracing::debug!("Listing {} stores", stores.len());
    Ok(Json(StoresResponse { ok: true, stores }))
}

/// List active users for a store
///
/// # Errors
///
/// * `400 Bad Request` - `tienda_id` missing or blank
/// * `404 Not Found` - unknown store
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<UsersResponse>, BackendError> {
    let store_id = query
        .store_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            BackendError::handler(axum::http::StatusCode::BAD_REQUEST, "tienda_id es requerido")
        })?;

    let repository = state.repository()?;
    if !repository.store_exists(&store_id).await? {
        return Err(BackendError::not_found("Tienda no encontrada"));
    }

    let users = repository.list_active_users().await?;
    tracing::debug!("Listing {} users for store {}", users.len(), store_id);
    Ok(Json(UsersResponse { ok: true, users }))
}
