/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Raised directly by handlers with an explicit status:
 * - Authentication failures (401, one generic message for every cause)
 * - Missing admin role (403)
 * - Unknown store or user (404)
 * - Persistence not configured (503)
 *
 * ## Validation Errors
 *
 * `SharedError` values produced while checking request bodies (422).
 *
 * ## Internal Errors
 *
 * Database, hashing, signing and task failures. Their details are logged
 * but never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::backend::repository::RepositoryError;
use crate::shared::config::ConfigError;
use crate::shared::SharedError;

/// Message returned for every failed login and every rejected token
pub const INVALID_CREDENTIALS: &str = "Credenciales incorrectas";

const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pos_auth::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::NOT_FOUND, "Tienda no encontrada");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Client input failed validation
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Persistence failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing failure
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Invalid startup configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 401 with the generic credentials message
    pub fn unauthorized() -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
    }

    /// 403 for authenticated callers lacking the admin role
    pub fn forbidden() -> Self {
        Self::handler(StatusCode::FORBIDDEN, "Se requiere rol de administrador")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 503 when no repository is configured
    pub fn unavailable() -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, "Base de datos no configurada")
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 422 for validation, 400 for serialization
    /// - `Repository` - 409 on conflicts, 500 otherwise
    /// - `Password` - 422 for over-long passwords, 500 otherwise
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                SharedError::SerializationError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Password(PasswordError::TooLong { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Repository(_)
            | Self::Password(_)
            | Self::Token(_)
            | Self::Config(_)
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Internal failures collapse to a generic message.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.detail().to_string(),
            Self::Repository(RepositoryError::Conflict(_)) => "El usuario ya existe".to_string(),
            Self::Password(PasswordError::TooLong { .. }) => "Contraseña muy larga".to_string(),
            _ => INTERNAL_ERROR.to_string(),
        }
    }
}
