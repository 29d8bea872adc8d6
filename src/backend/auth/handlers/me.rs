/**
 * Get Current Session Handler
 *
 * GET /auth/me returns the claims of the presented bearer token. It runs
 * behind the authentication middleware, so reaching the handler means the
 * token is valid.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::MeResponse;
use crate::backend::middleware::auth::AuthUser;

/// Current session handler
pub async fn get_me(AuthUser(claims): AuthUser) -> Json<MeResponse> {
    tracing::debug!("Session lookup for user {}", claims.user_id);
    Json(MeResponse { ok: true, claims })
}
