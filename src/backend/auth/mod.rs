//! Authentication Module
//!
//! This module handles credential hashing, bearer tokens and the HTTP
//! endpoints built on them.
//!
//! # Architecture
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`sessions`** - signed, time-bounded bearer tokens
//! - **`handlers`** - HTTP handlers for login, session and user management
//!
//! # Authentication Flow
//!
//! 1. **Login**: store + user + password → hash verified → token returned
//! 2. **Protected request**: `Authorization: Bearer <token>` → token verified → claims available to the handler
//! 3. **Admin request**: as above, and the claims must carry the admin role
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless and expire after the configured lifetime (12 hours by default)
//! - There is no revocation; a token is valid until it expires
//! - Invalid credentials and invalid tokens return 401 (no information leakage)

/// Password hashing
pub mod password;

/// Bearer token issuance and verification
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{admin_create_user, bootstrap_create_user, get_me, login, reset_password};
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{Claims, Principal, TokenError, TokenService};
