//! Common test utilities and helpers
//!
//! Builds the full router over an in-memory repository and drives it with
//! `tower::ServiceExt::oneshot`, so no socket or database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use pos_auth::backend::auth::PasswordHasher;
use pos_auth::backend::repository::{MemoryRepository, PosRepository, UserRecord};
use pos_auth::backend::routes::create_router;
use pos_auth::backend::AppState;
use pos_auth::shared::{AppConfig, Role, Store};

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BOOTSTRAP_KEY: &str = "bootstrap-test-key";
pub const STORE_CENTRO: &str = "11111111-1111-1111-1111-111111111111";
pub const STORE_NORTE: &str = "22222222-2222-2222-2222-222222222222";

/// Lowest bcrypt cost, keeps the suite fast
pub const TEST_COST: u32 = 4;

/// Seeded user credentials
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub password: String,
}

/// Router plus handles to the data behind it
pub struct TestApp {
    pub router: Router,
    pub repository: Arc<MemoryRepository>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// App with two stores, a bootstrap key and no users
    pub fn new() -> Self {
        let config = test_config().build().expect("test config");
        Self::with_config(&config)
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let repository = Arc::new(MemoryRepository::with_stores(vec![
            Store {
                id: STORE_CENTRO.to_string(),
                name: "Centro".to_string(),
            },
            Store {
                id: STORE_NORTE.to_string(),
                name: "Norte".to_string(),
            },
        ]));
        let state = AppState::new(
            config,
            Some(repository.clone() as Arc<dyn PosRepository>),
        )
        .expect("app state");

        Self {
            router: create_router(state, &config.cors_origins),
            repository,
            hasher: PasswordHasher::new(TEST_COST, 1024).expect("hasher"),
        }
    }

    /// Seed a user directly into the repository
    pub async fn seed_user(&self, name: &str, role: Role, password: &str, active: bool) -> TestUser {
        let id = uuid::Uuid::new_v4().to_string();
        let record = UserRecord {
            id: id.clone(),
            name: name.to_string(),
            role,
            password_hash: self.hasher.hash(password).expect("hash"),
        };
        self.repository.insert_user(record, active).await;

        TestUser {
            id,
            name: name.to_string(),
            password: password.to_string(),
        }
    }

    /// Log a user in and return the bearer token
    pub async fn login(&self, user: &TestUser) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/login",
                Some(serde_json::json!({
                    "tienda_id": STORE_CENTRO,
                    "usuario_id": user.id,
                    "password": user.password,
                })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    /// Send a request and decode the JSON body (`Value::Null` if empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }
}

/// Configuration used across the suite
pub fn test_config() -> pos_auth::shared::AppConfigBuilder {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(TEST_COST)
        .bootstrap_key(BOOTSTRAP_KEY)
}
