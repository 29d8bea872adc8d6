/**
 * Authentication Handler Types
 *
 * Request and response bodies for the login, provisioning and password
 * endpoints. Wire names follow the point-of-sale frontend (`tienda_id`,
 * `usuario_id`, `nombre`, `rol`).
 *
 * Request types carry plaintext passwords, so their `Debug` output masks
 * them.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::backend::auth::sessions::Claims;
use crate::shared::models::{Role, UserSummary};

/// Login request
#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    /// Store the user is signing in to
    #[serde(rename = "tienda_id")]
    pub store_id: String,
    /// User identifier picked from `/usuarios`
    #[serde(rename = "usuario_id")]
    pub user_id: String,
    /// Plaintext password (verified against the stored hash)
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("store_id", &self.store_id)
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signed-in user as returned by login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "tienda_id")]
    pub store_id: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub ok: bool,
    /// Bearer token
    pub token: String,
    pub user: SessionUser,
}

/// Current session response
#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub ok: bool,
    pub claims: Claims,
}

/// Create user request, used by bootstrap and admin provisioning
#[derive(Deserialize, Serialize)]
pub struct CreateUserRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    /// Free-form role; normalised by `Role::parse_input`
    #[serde(rename = "rol")]
    pub role: String,
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Query string of the bootstrap endpoint
#[derive(Deserialize)]
pub struct BootstrapQuery {
    pub master_key: Option<String>,
}

/// Created user response
#[derive(Serialize, Deserialize, Debug)]
pub struct UserCreatedResponse {
    pub ok: bool,
    pub user: UserSummary,
}

/// Password reset request
#[derive(Deserialize, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

impl fmt::Debug for ResetPasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetPasswordRequest")
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bare acknowledgement
#[derive(Serialize, Deserialize, Debug)]
pub struct OkResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_wire_names() {
        let request: LoginRequest = serde_json::from_value(serde_json::json!({
            "tienda_id": "t1",
            "usuario_id": "u1",
            "password": "hunter2"
        }))
        .unwrap();
        assert_eq!(request.store_id, "t1");
        assert_eq!(request.user_id, "u1");
        assert!(!format!("{:?}", request).contains("hunter2"));
    }

    #[test]
    fn test_create_user_request_debug_masks_password() {
        let request = CreateUserRequest {
            name: "Ana".to_string(),
            role: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let rendered = format!("{:?}", request);
        assert!(rendered.contains("Ana"));
        assert!(!rendered.contains("hunter2"));
    }
}
