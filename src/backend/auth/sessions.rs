/**
 * Session Tokens
 *
 * This module issues and verifies the signed bearer tokens handed out at
 * login.
 *
 * # Token Contents
 *
 * Tokens are HMAC-signed JWTs carrying `user_id`, `role`, `tenant_id`,
 * `iat` and `exp`. The payload is signed, not encrypted: never put a
 * secret in it.
 *
 * # Validation
 *
 * A token is accepted only when its signature matches the configured
 * secret and algorithm and the current time is not past `exp` (no leeway).
 * Every other outcome (bad signature, expired, malformed, wrong algorithm)
 * is reported as `None`. Callers cannot tell these cases apart and answer
 * all of them with 401.
 */

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::shared::config::{SecurityConfig, SigningAlgorithm};
use crate::shared::models::Role;

/// Identity a token is issued for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Opaque user identifier
    pub user_id: String,
    pub role: Role,
    /// Store the user signed in to
    pub tenant_id: String,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub user_id: String,
    /// Role at issuance time
    pub role: Role,
    /// Store (tenant) ID
    pub tenant_id: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.user_id.clone(),
            role: self.role,
            tenant_id: self.tenant_id.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Errors raised while issuing a token
#[derive(Debug, Error)]
pub enum TokenError {
    /// Lifetime does not fit in a timestamp
    #[error("token lifetime out of range")]
    LifetimeOutOfRange,

    /// Signing failure
    #[error("failed to sign token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Issues and verifies bearer tokens with a process-wide secret
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_lifetime: Duration,
}

impl TokenService {
    /// Build the service from startup configuration
    pub fn new(config: &SecurityConfig) -> Self {
        let algorithm = match config.algorithm() {
            SigningAlgorithm::Hs256 => Algorithm::HS256,
            SigningAlgorithm::Hs384 => Algorithm::HS384,
            SigningAlgorithm::Hs512 => Algorithm::HS512,
        };
        let secret = config.jwt_secret().as_bytes();

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            default_lifetime: config.token_lifetime(),
        }
    }

    /// Lifetime used by `issue_session`
    pub fn default_lifetime(&self) -> Duration {
        self.default_lifetime
    }

    /// Issue a token with the configured lifetime
    pub fn issue_session(&self, principal: &Principal) -> Result<String, TokenError> {
        self.issue(principal, self.default_lifetime)
    }

    /// Issue a token valid for `lifetime` from now
    pub fn issue(&self, principal: &Principal, lifetime: Duration) -> Result<String, TokenError> {
        self.issue_at(principal, lifetime, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        principal: &Principal,
        lifetime: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let lifetime =
            chrono::Duration::from_std(lifetime).map_err(|_| TokenError::LifetimeOutOfRange)?;
        let exp = now
            .checked_add_signed(lifetime)
            .ok_or(TokenError::LifetimeOutOfRange)?;

        let claims = Claims {
            user_id: principal.user_id.clone(),
            role: principal.role,
            tenant_id: principal.tenant_id.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?)
    }

    /// Verify and decode a token
    ///
    /// Returns `None` for every kind of invalid token.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Token rejected: {:?}", e.kind());
                None
            }
        }
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_lifetime", &self.default_lifetime)
            .finish_non_exhaustive()
    }
}
