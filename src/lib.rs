//! pos-auth - Point-of-Sale Authentication Backend
//!
//! A multi-tenant point-of-sale authentication server: list stores, list
//! the users who can sign in, authenticate with a password, and let admins
//! provision users and reset passwords.
//!
//! # Module Structure
//!
//! - **`shared`** - Models, validation errors and configuration
//!   - `Role`, `Store`, `UserSummary`
//!   - `AppConfig` / `SecurityConfig`, resolved once at startup
//!
//! - **`backend`** - Server-side code (only compiled with `ssr`, on by default)
//!   - Axum HTTP server and routes
//!   - bcrypt password hashing and JWT bearer tokens
//!   - PostgreSQL and in-memory repositories
//!
//! # Usage
//!
//! ```rust,no_run
//! use pos_auth::backend::create_app;
//! use pos_auth::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.server_port)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security Model
//!
//! - Passwords are stored as bcrypt hashes only
//! - Tokens are HMAC-signed, carry `user_id`, `role`, `tenant_id`, `iat`
//!   and `exp`, and are never stored server-side
//! - Expired, forged and malformed tokens are all rejected the same way
//! - There is no token revocation

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
