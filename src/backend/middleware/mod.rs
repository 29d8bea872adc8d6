//! Middleware Module
//!
//! This module contains HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer token verification and the `AuthUser`/`AdminUser` extractors

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AdminUser, AuthUser};
