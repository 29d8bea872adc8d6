/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Check the store exists
 * 2. Look up the active user by identifier
 * 3. Verify the password with bcrypt (on the blocking pool)
 * 4. Issue a bearer token scoped to the store
 *
 * # Security
 *
 * - Unknown store, unknown or inactive user and wrong password all answer
 *   401 with the same body
 * - An unknown user still costs one bcrypt verification
 * - Passwords are never logged or returned
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse, SessionUser};
use crate::backend::auth::sessions::Principal;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - store or user not found, or password incorrect
/// * `503 Service Unavailable` - database not configured
/// * `500 Internal Server Error` - database query or token generation failed
///
/// # Example Request
///
/// ```http
/// POST /auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "tienda_id": "5b0c...",
///   "usuario_id": "9f1e...",
///   "password": "1234"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "ok": true,
///   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "user": { "id": "9f1e...", "nombre": "Ana", "rol": "admin", "tienda_id": "5b0c..." }
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, BackendError> {
    let Json(request) = payload?;
    let repository = state.repository()?;
    tracing::info!("Login request for user {} at store {}", request.user_id, request.store_id);

    if !repository.store_exists(&request.store_id).await? {
        tracing::warn!("Login for unknown store: {}", request.store_id);
        return Err(BackendError::unauthorized());
    }

    let user = repository.find_active_user(&request.user_id).await?;
    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let valid = state.verify_password(request.password, stored_hash).await?;

    let user = match user {
        Some(user) if valid => user,
        Some(_) => {
            tracing::warn!("Invalid password for user: {}", request.user_id);
            return Err(BackendError::unauthorized());
        }
        None => {
            tracing::warn!("User not found or inactive: {}", request.user_id);
            return Err(BackendError::unauthorized());
        }
    };

    let principal = Principal {
        user_id: user.id.clone(),
        role: user.role,
        tenant_id: request.store_id.clone(),
    };
    let token = state.tokens.issue_session(&principal)?;

    tracing::info!("User logged in successfully: {} ({})", user.name, user.id);

    Ok(Json(LoginResponse {
        ok: true,
        token,
        user: SessionUser {
            id: user.id,
            name: user.name,
            role: user.role,
            store_id: request.store_id,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::repository::{MemoryRepository, NewUser, PosRepository};
    use crate::shared::config::AppConfig;
    use crate::shared::models::{Role, Store};
    use axum::http::StatusCode;
    use std::sync::Arc;

    async fn setup() -> (AppState, String) {
        let repository = Arc::new(MemoryRepository::with_stores(vec![Store {
            id: "t1".to_string(),
            name: "Centro".to_string(),
        }]));
        let config = AppConfig::builder()
            .jwt_secret("login-test")
            .bcrypt_cost(4)
            .build()
            .unwrap();
        let state = AppState::new(&config, Some(repository.clone() as Arc<dyn PosRepository>)).unwrap();

        let password_hash = state.hash_password("1234".to_string()).await.unwrap();
        let user = repository
            .create_user(NewUser {
                name: "Ana".to_string(),
                role: Role::Admin,
                email: NewUser::technical_email("Ana"),
                password_hash,
            })
            .await
            .unwrap();
        (state, user.id)
    }

    fn request(store_id: &str, user_id: &str, password: &str) -> Result<Json<LoginRequest>, JsonRejection> {
        Ok(Json(LoginRequest {
            store_id: store_id.to_string(),
            user_id: user_id.to_string(),
            password: password.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_login_success() {
        let (state, user_id) = setup().await;
        let Json(response) = login(State(state.clone()), request("t1", &user_id, "1234"))
            .await
            .unwrap();

        assert!(response.ok);
        assert_eq!(response.user.id, user_id);
        assert_eq!(response.user.role, Role::Admin);
        assert_eq!(response.user.store_id, "t1");

        let claims = state.tokens.verify(&response.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.tenant_id, "t1");
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let (state, user_id) = setup().await;
        let err = login(State(state), request("t1", &user_id, "wrong")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_user_not_found() {
        let (state, _) = setup().await;
        let err = login(State(state), request("t1", "nobody", "1234")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_store() {
        let (state, user_id) = setup().await;
        let err = login(State(state), request("t9", &user_id, "1234")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_no_database() {
        let (state, _) = setup().await;
        let state = AppState {
            repository: None,
            ..state
        };
        let err = login(State(state), request("t1", "u1", "1234")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
