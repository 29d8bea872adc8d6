/**
 * User Provisioning Handlers
 *
 * Two ways to create a point-of-sale user:
 *
 * - `POST /bootstrap/create-user?master_key=...` - guarded by the
 *   configured bootstrap key, used to create the first admin
 * - `POST /admin/users` - bearer token with the admin role
 *
 * # Validation
 *
 * - Password must have at least `min_password_len` characters
 * - Role must be `normal`, `admin`, `administración` or `administracion`
 * - Name must not be blank
 *
 * # Storage
 *
 * The password is hashed on the blocking pool and only the hash is stored,
 * together with a technical email (`<name>@local.pos`).
 */

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{BootstrapQuery, CreateUserRequest, UserCreatedResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AdminUser;
use crate::backend::repository::NewUser;
use crate::backend::server::state::{AccountPolicy, AppState};
use crate::shared::models::{Role, UserSummary};
use crate::shared::SharedError;

/// Check a new password against the account policy
pub fn validate_password(password: &str, policy: &AccountPolicy) -> Result<(), SharedError> {
    if password.chars().count() < policy.min_password_len {
        return Err(SharedError::validation("password", "Contraseña muy corta"));
    }
    Ok(())
}

/// Validate a create request, returning the trimmed name and parsed role
pub fn validate_new_user(
    request: &CreateUserRequest,
    policy: &AccountPolicy,
) -> Result<(String, Role), SharedError> {
    validate_password(&request.password, policy)?;
    let role = Role::parse_input(&request.role)?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(SharedError::validation("nombre", "Nombre requerido"));
    }

    Ok((name.to_string(), role))
}

/// Compare two secrets without short-circuiting on the first difference
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

async fn provision_user(
    state: &AppState,
    request: CreateUserRequest,
) -> Result<UserSummary, BackendError> {
    let (name, role) = validate_new_user(&request, &state.accounts)?;
    let repository = state.repository()?;

    let password_hash = state.hash_password(request.password).await?;
    let user = repository
        .create_user(NewUser {
            email: NewUser::technical_email(&name),
            name,
            role,
            password_hash,
        })
        .await?;

    tracing::info!("User created: {} ({}, {})", user.name, user.id, user.role);
    Ok(user)
}

/// Bootstrap create-user handler
///
/// # Errors
///
/// * `404 Not Found` - no bootstrap key configured
/// * `401 Unauthorized` - missing or wrong `master_key`
/// * `422 Unprocessable Entity` - validation failed
/// * `409 Conflict` - a user with the same technical email exists
pub async fn bootstrap_create_user(
    State(state): State<AppState>,
    Query(query): Query<BootstrapQuery>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserCreatedResponse>, BackendError> {
    let expected = state.accounts.bootstrap_key.as_deref().ok_or_else(|| {
        tracing::warn!("Bootstrap endpoint called but BOOTSTRAP_KEY is not set");
        BackendError::not_found("Not Found")
    })?;

    let provided = query.master_key.unwrap_or_default();
    if !constant_time_eq(provided.as_bytes(), expected.as_bytes()) {
        tracing::warn!("Bootstrap attempt with wrong master key");
        return Err(BackendError::handler(
            axum::http::StatusCode::UNAUTHORIZED,
            "Clave incorrecta",
        ));
    }

    let Json(request) = payload?;
    let user = provision_user(&state, request).await?;
    Ok(Json(UserCreatedResponse { ok: true, user }))
}

/// Admin create-user handler
pub async fn admin_create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserCreatedResponse>, BackendError> {
    let Json(request) = payload?;
    tracing::info!("Admin {} is creating user {}", admin.user_id, request.name.trim());

    let user = provision_user(&state, request).await?;
    Ok(Json(UserCreatedResponse { ok: true, user }))
}
