//! Domain Models
//!
//! Client-safe data structures returned by the HTTP API. Field names on the
//! wire follow the point-of-sale frontend (`nombre`, `rol`), while the Rust
//! side uses English names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::error::SharedError;

/// Role of a point-of-sale user
///
/// Embedded in bearer tokens and persisted in the `rol` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Cashier-level access
    Normal,
    /// May provision users and reset passwords
    Admin,
}

impl Role {
    /// Canonical lowercase name, as stored and embedded in tokens
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Normal => "normal",
            Role::Admin => "admin",
        }
    }

    /// Parse a role typed by an operator
    ///
    /// Input is trimmed and lower-cased. Accepts `normal`, `admin`,
    /// `administración` and `administracion`; anything else is a
    /// validation error.
    pub fn parse_input(raw: &str) -> Result<Self, SharedError> {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "normal" => Ok(Role::Normal),
            "admin" | "administración" | "administracion" => Ok(Role::Admin),
            _ => Err(SharedError::validation("rol", "Rol inválido")),
        }
    }

    /// Interpret a role read back from storage
    ///
    /// Storage is not trusted to hold canonical values: anything starting
    /// with `admin` is an admin, everything else is a normal user.
    pub fn from_stored(raw: &str) -> Self {
        if raw.trim().to_lowercase().starts_with("admin") {
            Role::Admin
        } else {
            Role::Normal
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A store (tenant) that users can sign in to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Opaque store identifier
    pub id: String,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
}

/// User information that is safe to return to clients
///
/// Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Opaque user identifier
    pub id: String,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_accepts_known_roles() {
        assert_eq!(Role::parse_input("normal").unwrap(), Role::Normal);
        assert_eq!(Role::parse_input("  Admin ").unwrap(), Role::Admin);
        assert_eq!(Role::parse_input("ADMINISTRACIÓN").unwrap(), Role::Admin);
        assert_eq!(Role::parse_input("administracion").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_input_rejects_unknown_role() {
        let err = Role::parse_input("gerente").unwrap_err();
        assert_eq!(err, SharedError::validation("rol", "Rol inválido"));
    }

    #[test]
    fn test_from_stored_is_lenient() {
        assert_eq!(Role::from_stored("admin"), Role::Admin);
        assert_eq!(Role::from_stored("Administración"), Role::Admin);
        assert_eq!(Role::from_stored("normal"), Role::Normal);
        assert_eq!(Role::from_stored(""), Role::Normal);
    }

    #[test]
    fn test_user_summary_wire_names() {
        let user = UserSummary {
            id: "u1".to_string(),
            name: "Ana".to_string(),
            role: Role::Admin,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": "u1", "nombre": "Ana", "rol": "admin"}));
    }
}
