/**
 * In-Memory Repository
 *
 * `PosRepository` kept in process memory behind a `tokio::sync::RwLock`.
 * Used by the test suite. The server binary never selects it; without
 * `DATABASE_URL` it runs with no repository and data endpoints answer 503.
 *
 * `insert_user` and `password_hash` are test helpers for seeding and
 * inspecting state. They bypass validation and are not part of the
 * `PosRepository` contract.
 */

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::repository::{NewUser, PosRepository, RepositoryError, UserRecord};
use crate::shared::models::{Store, UserSummary};

#[derive(Debug, Clone)]
struct StoredUser {
    record: UserRecord,
    email: String,
    active: bool,
}

#[derive(Debug, Default)]
struct MemoryData {
    stores: Vec<Store>,
    users: Vec<StoredUser>,
}

/// Repository kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: RwLock<MemoryData>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with stores
    pub fn with_stores(stores: Vec<Store>) -> Self {
        Self {
            data: RwLock::new(MemoryData {
                stores,
                users: Vec::new(),
            }),
        }
    }

    /// Test helper: insert a user record as-is, e.g. to seed an inactive user
    pub async fn insert_user(&self, record: UserRecord, active: bool) {
        let email = NewUser::technical_email(&record.name);
        self.data.write().await.users.push(StoredUser {
            record,
            email,
            active,
        });
    }

    /// Test helper: stored hash for a user regardless of active flag
    pub async fn password_hash(&self, user_id: &str) -> Option<String> {
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.record.id == user_id)
            .map(|u| u.record.password_hash.clone())
    }
}

#[async_trait]
impl PosRepository for MemoryRepository {
    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        let mut stores = self.data.read().await.stores.clone();
        stores.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stores)
    }

    async fn store_exists(&self, store_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.data.read().await.stores.iter().any(|s| s.id == store_id))
    }

    async fn list_active_users(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let data = self.data.read().await;
        let mut users: Vec<UserSummary> = data
            .users
            .iter()
            .filter(|u| u.active)
            .map(|u| u.record.summary())
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn find_active_user(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self
            .data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.active && u.record.id == user_id)
            .map(|u| u.record.clone()))
    }

    async fn create_user(&self, user: NewUser) -> Result<UserSummary, RepositoryError> {
        let mut data = self.data.write().await;
        if data.users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            role: user.role,
            password_hash: user.password_hash,
        };
        let summary = record.summary();
        data.users.push(StoredUser {
            record,
            email: user.email,
            active: true,
        });
        Ok(summary)
    }

    async fn set_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let mut data = self.data.write().await;
        match data.users.iter_mut().find(|u| u.record.id == user_id) {
            Some(user) => {
                user.record.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
