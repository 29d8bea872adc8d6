//! Repository Module
//!
//! Persistence seam between the HTTP handlers and the database. Handlers
//! only see the `PosRepository` trait; the authentication core only needs
//! two of its operations (look a user up by identifier, persist a password
//! hash).
//!
//! # Implementations
//!
//! - **`PgRepository`** - PostgreSQL via `sqlx`, schema in `migrations/`
//! - **`MemoryRepository`** - in-process store used by the test suite

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::shared::models::{Role, Store, UserSummary};

/// PostgreSQL implementation
pub mod postgres;

/// In-memory implementation
pub mod memory;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Full user row, including the stored password hash
///
/// Never serialized; the `Debug` impl hides the hash.
#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub password_hash: String,
}

impl UserRecord {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Data needed to insert a user
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
    /// Technical address, unique per user
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Derive the technical email for a display name
    ///
    /// `"Ana María"` becomes `"anamaría@local.pos"`.
    pub fn technical_email(name: &str) -> String {
        let local: String = name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("{}@local.pos", local)
    }
}

/// Repository errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// Database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage operations used by the point-of-sale API
#[async_trait]
pub trait PosRepository: Send + Sync {
    /// All stores, ordered by name
    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError>;

    async fn store_exists(&self, store_id: &str) -> Result<bool, RepositoryError>;

    /// Active users, ordered by name
    async fn list_active_users(&self) -> Result<Vec<UserSummary>, RepositoryError>;

    /// Look up an active user by identifier
    async fn find_active_user(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// Insert an active user
    async fn create_user(&self, user: NewUser) -> Result<UserSummary, RepositoryError>;

    /// Replace a user's password hash; `false` when no such user exists
    async fn set_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError>;
}
