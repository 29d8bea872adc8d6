//! Shared Error Types
//!
//! This module defines error types that describe caller-side failures:
//! request payloads that are well-formed JSON but break a business rule.
//!
//! # Error Categories
//!
//! - `ValidationError` - Policy violations (short password, unknown role, empty name)
//! - `SerializationError` - JSON serialization/deserialization failures
//!
//! # Usage
//!
//! ```rust
//! use pos_auth::shared::error::SharedError;
//!
//! let error = SharedError::validation("password", "Contraseña muy corta");
//! ```
use thiserror::Error;

/// Shared error types raised while validating client input
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Message suitable for a client-facing `detail` field
    pub fn detail(&self) -> &str {
        match self {
            Self::SerializationError { message } => message,
            Self::ValidationError { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let error = SharedError::serialization("Invalid JSON");
        match error {
            SharedError::SerializationError { message } => {
                assert_eq!(message, "Invalid JSON");
            }
            _ => panic!("Expected SerializationError"),
        }
    }

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("rol", "Rol inválido");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "rol");
                assert_eq!(message, "Rol inválido");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_detail_omits_field_name() {
        let error = SharedError::validation("password", "Contraseña muy corta");
        assert_eq!(error.detail(), "Contraseña muy corta");
        assert!(error.to_string().contains("password"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let shared: SharedError = err.into();
        assert!(matches!(shared, SharedError::SerializationError { .. }));
    }
}
