//! Directory Module
//!
//! Public, read-only endpoints the sign-in screen uses before a user has a
//! token: the store list and the list of active users.
//!
//! - `GET /health` - liveness probe
//! - `GET /tiendas` - all stores
//! - `GET /usuarios?tienda_id=...` - active users for the sign-in picker

/// HTTP handlers for directory endpoints
pub mod handlers;

pub use handlers::{health, list_stores, list_users};
