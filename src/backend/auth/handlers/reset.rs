/**
 * Password Reset Handler
 *
 * PUT /admin/users/{user_id}/password lets an admin set a new password for
 * any user. The new password goes through the same policy as user
 * creation, is hashed on the blocking pool, and replaces the stored hash.
 *
 * Tokens already issued to the user stay valid until they expire.
 */

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use crate::backend::auth::handlers::provision::validate_password;
use crate::backend::auth::handlers::types::{OkResponse, ResetPasswordRequest};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AdminUser;
use crate::backend::server::state::AppState;

/// Admin password reset handler
///
/// # Errors
///
/// * `401`/`403` - missing token or caller is not an admin
/// * `422 Unprocessable Entity` - password too short or too long
/// * `404 Not Found` - no such user
pub async fn reset_password(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<String>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, BackendError> {
    let Json(request) = payload?;
    validate_password(&request.password, &state.accounts)?;
    let repository = state.repository()?;

    let password_hash = state.hash_password(request.password).await?;
    if !repository.set_password_hash(&user_id, &password_hash).await? {
        tracing::warn!("Password reset for unknown user: {}", user_id);
        return Err(BackendError::not_found("Usuario no encontrado"));
    }

    tracing::info!("Admin {} reset the password of user {}", admin.user_id, user_id);
    Ok(Json(OkResponse { ok: true }))
}
