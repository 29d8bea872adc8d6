/**
 * Password Hashing
 *
 * This module turns plaintext passwords into bcrypt hashes and verifies
 * candidates against stored hashes.
 *
 * # Hash Format
 *
 * The stored string is bcrypt's modular crypt format
 * (`$2b$<cost>$<salt><digest>`), so the salt and cost travel with the hash
 * and nothing else needs to be persisted.
 *
 * # Security
 *
 * - Every call to `hash` draws a fresh random salt
 * - Comparison is done by bcrypt itself
 * - A corrupt or foreign hash string is an authentication failure, not an error
 * - Passwords above the configured byte limit are refused before any work
 *   is done, so the slow hash cannot be used to burn CPU
 */

use thiserror::Error;

use crate::shared::config::{SecurityConfig, MAX_BCRYPT_COST, MIN_BCRYPT_COST};

/// Errors raised while producing a new hash
#[derive(Debug, Error)]
pub enum PasswordError {
    /// Password exceeds the configured byte limit
    #[error("password exceeds {max} bytes")]
    TooLong {
        /// Configured limit
        max: usize,
    },

    /// Cost factor outside bcrypt's supported range
    #[error("bcrypt cost {0} is outside {min}..={max}", min = MIN_BCRYPT_COST, max = MAX_BCRYPT_COST)]
    InvalidCost(u32),

    /// Underlying bcrypt failure
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Salted, adaptive password hasher
///
/// Stateless apart from its settings; clone it or share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    max_password_bytes: usize,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with an explicit cost factor and length limit
    pub fn new(cost: u32, max_password_bytes: usize) -> Result<Self, PasswordError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        // verified against when a user does not exist, so lookups cost the same
        let dummy_hash = bcrypt::hash("pos-auth-dummy-password", cost)?;
        Ok(Self {
            cost,
            max_password_bytes,
            dummy_hash,
        })
    }

    /// Create a hasher from the startup configuration
    pub fn from_config(config: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(config.bcrypt_cost(), config.max_password_bytes())
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password for storage
    ///
    /// Empty passwords are accepted; length policy belongs to the caller.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > self.max_password_bytes {
            return Err(PasswordError::TooLong {
                max: self.max_password_bytes,
            });
        }
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Check a candidate password against a stored hash
    ///
    /// Returns `false` for a wrong password, an over-long candidate, and a
    /// hash string bcrypt cannot parse alike.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        if password.len() > self.max_password_bytes {
            tracing::debug!("Rejecting over-long password candidate");
            return false;
        }
        match bcrypt::verify(password, stored_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }

    /// Burn one verification for an unknown user and return `false`
    pub fn verify_missing(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.dummy_hash);
        false
    }
}
