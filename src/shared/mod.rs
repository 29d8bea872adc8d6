//! Shared Module
//!
//! Types that do not depend on the server stack: client-facing models,
//! validation errors and the startup configuration.

/// Shared error types
pub mod error;

/// Client-facing data structures
pub mod models;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError, SecurityConfig, SigningAlgorithm};
pub use error::SharedError;
pub use models::{Role, Store, UserSummary};
