//! Application configuration module
//!
//! Provides the immutable configuration resolved once at process startup.
//! The signing secret lives here and is handed to the token service at
//! construction time; nothing reads the environment per request.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Lowest cost factor bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost factor bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;
/// Default token lifetime in hours
pub const DEFAULT_TOKEN_LIFETIME_HOURS: u64 = 12;
/// Longest accepted token lifetime in hours (one year)
pub const MAX_TOKEN_LIFETIME_HOURS: u64 = 24 * 365;
/// Default upper bound on password length in bytes
pub const DEFAULT_MAX_PASSWORD_BYTES: usize = 1024;
/// Default minimum password length for newly provisioned credentials
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 4;
/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 8000;
/// Origins allowed by default (local frontend dev server)
pub const DEFAULT_CORS_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// HMAC algorithm used to sign bearer tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningAlgorithm {
    #[default]
    Hs256,
    Hs384,
    Hs512,
}

impl FromStr for SigningAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HS256" => Ok(Self::Hs256),
            "HS384" => Ok(Self::Hs384),
            "HS512" => Ok(Self::Hs512),
            other => Err(ConfigError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Credential and token settings
///
/// The `Debug` impl redacts the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    jwt_secret: String,
    algorithm: SigningAlgorithm,
    token_lifetime: Duration,
    bcrypt_cost: u32,
    max_password_bytes: usize,
}

impl SecurityConfig {
    /// Create a configuration with defaults for everything but the secret
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        Ok(Self {
            jwt_secret,
            algorithm: SigningAlgorithm::default(),
            token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_HOURS * 3600),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            max_password_bytes: DEFAULT_MAX_PASSWORD_BYTES,
        })
    }

    pub fn with_algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_max_password_bytes(mut self, max: usize) -> Self {
        self.max_password_bytes = max;
        self
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    pub fn max_password_bytes(&self) -> usize {
        self.max_password_bytes
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.token_lifetime.is_zero() {
            return Err(ConfigError::invalid("TOKEN_LIFETIME_HOURS", "must be greater than zero"));
        }
        if self.token_lifetime > Duration::from_secs(MAX_TOKEN_LIFETIME_HOURS * 3600) {
            return Err(ConfigError::invalid(
                "TOKEN_LIFETIME_HOURS",
                format!("must be at most {MAX_TOKEN_LIFETIME_HOURS}"),
            ));
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::invalid(
                "BCRYPT_COST",
                format!("must be within {MIN_BCRYPT_COST}..={MAX_BCRYPT_COST}"),
            ));
        }
        if self.max_password_bytes == 0 {
            return Err(ConfigError::invalid("MAX_PASSWORD_BYTES", "must be greater than zero"));
        }
        Ok(())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("token_lifetime", &self.token_lifetime)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("max_password_bytes", &self.max_password_bytes)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential hashing and token signing settings
    pub security: SecurityConfig,
    /// Minimum length for passwords set through the API
    pub min_password_len: usize,
    /// Key guarding the bootstrap endpoint; `None` disables it
    pub bootstrap_key: Option<String>,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Postgres connection string; `None` runs without persistence
    pub database_url: Option<String>,
    /// Port the HTTP server binds to
    pub server_port: u16,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder();
        if let Some(secret) = get("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(algorithm) = get("JWT_ALGORITHM") {
            builder = builder.algorithm(algorithm.parse()?);
        }
        if let Some(hours) = parse_var::<u64>(get("TOKEN_LIFETIME_HOURS"), "TOKEN_LIFETIME_HOURS")? {
            builder = builder.token_lifetime(Duration::from_secs(hours.saturating_mul(3600)));
        }
        if let Some(cost) = parse_var::<u32>(get("BCRYPT_COST"), "BCRYPT_COST")? {
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(max) = parse_var::<usize>(get("MAX_PASSWORD_BYTES"), "MAX_PASSWORD_BYTES")? {
            builder = builder.max_password_bytes(max);
        }
        if let Some(min) = parse_var::<usize>(get("MIN_PASSWORD_LEN"), "MIN_PASSWORD_LEN")? {
            builder = builder.min_password_len(min);
        }
        if let Some(key) = get("BOOTSTRAP_KEY") {
            builder = builder.bootstrap_key(key);
        }
        if let Some(origins) = get("CORS_ORIGINS") {
            builder = builder.cors_origins(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = parse_var::<u16>(get("SERVER_PORT"), "SERVER_PORT")? {
            builder = builder.server_port(port);
        }

        builder.build()
    }
}

fn parse_var<T: FromStr>(raw: Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T::Err: fmt::Display,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::invalid(key, e.to_string()))
    })
    .transpose()
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    algorithm: Option<SigningAlgorithm>,
    token_lifetime: Option<Duration>,
    bcrypt_cost: Option<u32>,
    max_password_bytes: Option<usize>,
    min_password_len: Option<usize>,
    bootstrap_key: Option<String>,
    cors_origins: Option<Vec<String>>,
    database_url: Option<String>,
    server_port: Option<u16>,
}

impl AppConfigBuilder {
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn algorithm(mut self, algorithm: SigningAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = Some(lifetime);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn max_password_bytes(mut self, max: usize) -> Self {
        self.max_password_bytes = Some(max);
        self
    }

    pub fn min_password_len(mut self, min: usize) -> Self {
        self.min_password_len = Some(min);
        self
    }

    pub fn bootstrap_key(mut self, key: impl Into<String>) -> Self {
        self.bootstrap_key = Some(key.into());
        self
    }

    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Build the configuration
    ///
    /// Fails when the signing secret is missing; a server without one must
    /// not start.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let secret = self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let mut security = SecurityConfig::new(secret)?;
        if let Some(algorithm) = self.algorithm {
            security = security.with_algorithm(algorithm);
        }
        if let Some(lifetime) = self.token_lifetime {
            security = security.with_token_lifetime(lifetime);
        }
        if let Some(cost) = self.bcrypt_cost {
            security = security.with_bcrypt_cost(cost);
        }
        if let Some(max) = self.max_password_bytes {
            security = security.with_max_password_bytes(max);
        }
        security.validate()?;

        Ok(AppConfig {
            security,
            min_password_len: self.min_password_len.unwrap_or(DEFAULT_MIN_PASSWORD_LEN),
            bootstrap_key: self.bootstrap_key,
            cors_origins: self.cors_origins.unwrap_or_else(|| {
                DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect()
            }),
            database_url: self.database_url,
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

/// Configuration errors
///
/// All of these are fatal at startup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),
}

impl ConfigError {
    pub fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            message: message.into(),
        }
    }
}
