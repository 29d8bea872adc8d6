//! Backend Module
//!
//! All server-side code: the Axum HTTP server, the authentication core and
//! persistence. Only compiled with the `ssr` feature (on by default).
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, resources
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Password hashing, bearer tokens, auth handlers
//! - **`directory`** - Store and user listings for the sign-in screen
//! - **`repository`** - Persistence trait with Postgres and in-memory backends
//! - **`middleware`** - Bearer token verification
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Thread Safety
//!
//! The hasher and token service are immutable after startup and shared via
//! `Arc`. bcrypt work runs on `tokio::task::spawn_blocking` so it never
//! stalls the reactor.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Store and user listings
pub mod directory;

/// Persistence
pub mod repository;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
