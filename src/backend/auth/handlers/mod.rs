//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Request and response types
//! ├── login.rs      - User authentication handler
//! ├── me.rs         - Current session handler
//! ├── provision.rs  - Bootstrap and admin user creation
//! └── reset.rs      - Admin password reset
//! ```
//!
//! # Handlers
//!
//! - **`login`** - POST /auth/login
//! - **`get_me`** - GET /auth/me (bearer)
//! - **`bootstrap_create_user`** - POST /bootstrap/create-user (master key)
//! - **`admin_create_user`** - POST /admin/users (bearer, admin)
//! - **`reset_password`** - PUT /admin/users/{user_id}/password (bearer, admin)

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Current session handler
pub mod me;

/// User creation handlers
pub mod provision;

/// Password reset handler
pub mod reset;

// Re-export commonly used types
pub use types::{CreateUserRequest, LoginRequest, LoginResponse, ResetPasswordRequest, SessionUser};

// Re-export handlers
pub use login::login;
pub use me::get_me;
pub use provision::{admin_create_user, bootstrap_create_user};
pub use reset::reset_password;
