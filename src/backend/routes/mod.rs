//! Routes Module
//!
//! HTTP route configuration.
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Router assembly and layers
//! └── api_routes.rs  - Public and protected API routes
//! ```

/// Router assembly
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
