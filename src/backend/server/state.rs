/**
 * Application State
 *
 * This module defines the application state structure and implements
 * `FromRef` so handlers and middleware can extract just the part they need.
 *
 * # Contents
 *
 * - `repository` - persistence, `None` when no database is configured
 * - `hasher` - bcrypt hasher built from the startup configuration
 * - `tokens` - bearer token issuer/verifier holding the signing secret
 * - `accounts` - password policy and bootstrap key
 *
 * Everything is immutable after startup and shared through `Arc`, so no
 * locking is needed on the request path.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::BackendError;
use crate::backend::repository::PosRepository;
use crate::shared::config::AppConfig;

/// Rules applied when credentials are created or replaced
#[derive(Debug, Clone)]
pub struct AccountPolicy {
    /// Minimum password length in characters
    pub min_password_len: usize,
    /// Key guarding `/bootstrap/create-user`; `None` disables the endpoint
    pub bootstrap_key: Option<String>,
}

/// Central state container for the Axum application
#[derive(Clone)]
pub struct AppState {
    pub repository: Option<Arc<dyn PosRepository>>,
    pub hasher: Arc<PasswordHasher>,
    pub tokens: Arc<TokenService>,
    pub accounts: Arc<AccountPolicy>,
}

impl AppState {
    /// Build the state from configuration
    ///
    /// Fails on an unusable bcrypt cost; the caller treats that as fatal.
    pub fn new(
        config: &AppConfig,
        repository: Option<Arc<dyn PosRepository>>,
    ) -> Result<Self, BackendError> {
        let hasher = PasswordHasher::from_config(&config.security)?;
        let tokens = TokenService::new(&config.security);

        Ok(Self {
            repository,
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
            accounts: Arc::new(AccountPolicy {
                min_password_len: config.min_password_len,
                bootstrap_key: config.bootstrap_key.clone(),
            }),
        })
    }

    /// The configured repository, or 503
    pub fn repository(&self) -> Result<&Arc<dyn PosRepository>, BackendError> {
        self.repository.as_ref().ok_or_else(|| {
            tracing::error!("Database not configured");
            BackendError::unavailable()
        })
    }

    /// Hash a password on the blocking pool
    pub async fn hash_password(&self, password: String) -> Result<String, BackendError> {
        let hasher = Arc::clone(&self.hasher);
        Ok(tokio::task::spawn_blocking(move || hasher.hash(&password)).await??)
    }

    /// Verify a password on the blocking pool
    ///
    /// With no stored hash (unknown user) a dummy verification still runs.
    pub async fn verify_password(
        &self,
        password: String,
        stored_hash: Option<String>,
    ) -> Result<bool, BackendError> {
        let hasher = Arc::clone(&self.hasher);
        let valid = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => hasher.verify_missing(&password),
        })
        .await?;
        Ok(valid)
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.tokens)
    }
}

impl FromRef<AppState> for Arc<AccountPolicy> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.accounts)
    }
}
