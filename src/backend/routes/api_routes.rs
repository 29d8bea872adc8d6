/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `GET /health` - Liveness probe
 * - `GET /tiendas` - Store list
 * - `GET /usuarios?tienda_id=` - Active users
 * - `POST /auth/login` - User login
 * - `POST /bootstrap/create-user?master_key=` - First user creation
 *
 * ## Bearer token required
 * - `GET /auth/me` - Current session claims
 * - `POST /admin/users` - Create user (admin)
 * - `PUT /admin/users/{user_id}/password` - Reset password (admin)
 */

use axum::{middleware, routing, Router};

use crate::backend::auth::{admin_create_user, bootstrap_create_user, get_me, login, reset_password};
use crate::backend::directory::{health, list_stores, list_users};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Configure public routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/health", routing::get(health))
        .route("/tiendas", routing::get(list_stores))
        .route("/usuarios", routing::get(list_users))
        .route("/auth/login", routing::post(login))
        .route("/bootstrap/create-user", routing::post(bootstrap_create_user))
}

/// Configure routes that require a valid bearer token
///
/// The auth middleware is applied with `route_layer`, so unknown paths
/// still fall through to the 404 fallback instead of answering 401.
pub fn configure_protected_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/me", routing::get(get_me))
        .route("/admin/users", routing::post(admin_create_user))
        .route("/admin/users/{user_id}/password", routing::put(reset_password))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    router.merge(protected)
}
