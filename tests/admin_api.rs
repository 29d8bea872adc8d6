//! Provisioning API integration tests
//!
//! Bootstrap user creation, admin user creation and admin password reset.

#![cfg(feature = "ssr")]

mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{test_config, TestApp, TestUser, BOOTSTRAP_KEY};
use pos_auth::shared::Role;

fn bootstrap_uri(key: &str) -> String {
    format!("/bootstrap/create-user?master_key={key}")
}

#[tokio::test]
async fn test_bootstrap_creates_user_who_can_log_in() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            &bootstrap_uri(BOOTSTRAP_KEY),
            Some(json!({ "nombre": "Ana", "rol": "Administración", "password": "clave123" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
    assert_eq!(body["user"]["nombre"], json!("Ana"));
    assert_eq!(body["user"]["rol"], json!("admin"));

    let user = TestUser {
        id: body["user"]["id"].as_str().unwrap().to_string(),
        name: "Ana".to_string(),
        password: "clave123".to_string(),
    };
    let token = app.login(&user).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_bootstrap_rejects_wrong_key() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Method::POST,
            &bootstrap_uri("wrong"),
            Some(json!({ "nombre": "Ana", "rol": "admin", "password": "clave123" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["ok"], json!(false));
    let (_, users) = app.get(&format!("/usuarios?tienda_id={}", common::STORE_CENTRO)).await;
    assert_eq!(users["usuarios"], json!([]));
}

#[tokio::test]
async fn test_bootstrap_disabled_without_key() {
    let config = pos_auth::shared::AppConfig::builder()
        .jwt_secret(common::TEST_SECRET)
        .bcrypt_cost(common::TEST_COST)
        .build()
        .unwrap();
    let app = TestApp::with_config(&config);

    let (status, _) = app
        .send(
            Method::POST,
            &bootstrap_uri(BOOTSTRAP_KEY),
            Some(json!({ "nombre": "Ana", "rol": "admin", "password": "clave123" })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bootstrap_validates_input() {
    let app = TestApp::new();

    let cases = [
        json!({ "nombre": "Ana", "rol": "admin", "password": "abc" }),
        json!({ "nombre": "Ana", "rol": "superuser", "password": "clave123" }),
        json!({ "nombre": "   ", "rol": "normal", "password": "clave123" }),
    ];
    for case in cases {
        let (status, body) = app
            .send(Method::POST, &bootstrap_uri(BOOTSTRAP_KEY), Some(case), None)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["ok"], json!(false));
    }
}

#[tokio::test]
async fn test_duplicate_name_conflicts() {
    let app = TestApp::new();
    let payload = json!({ "nombre": "Ana", "rol": "normal", "password": "clave123" });

    let (status, _) = app
        .send(Method::POST, &bootstrap_uri(BOOTSTRAP_KEY), Some(payload.clone()), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::POST, &bootstrap_uri(BOOTSTRAP_KEY), Some(payload), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_creates_user() {
    let app = TestApp::new();
    let admin = app.seed_user("Ana", Role::Admin, "clave123", true).await;
    let token = app.login(&admin).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/admin/users",
            Some(json!({ "nombre": "Beto", "rol": "normal", "password": "cajero1" })),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["nombre"], json!("Beto"));
    assert_eq!(body["user"]["rol"], json!("normal"));
}

#[tokio::test]
async fn test_admin_routes_forbidden_for_normal_role() {
    let app = TestApp::new();
    let cashier = app.seed_user("Beto", Role::Normal, "cajero1", true).await;
    let token = app.login(&cashier).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/admin/users",
            Some(json!({ "nombre": "Eva", "rol": "admin", "password": "clave123" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/admin/users/{}/password", cashier.id),
            Some(json!({ "password": "nueva123" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Method::POST,
            "/admin/users",
            Some(json!({ "nombre": "Eva", "rol": "admin", "password": "clave123" })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_password_replaces_credential() {
    let app = TestApp::new();
    let admin = app.seed_user("Ana", Role::Admin, "clave123", true).await;
    let cashier = app.seed_user("Beto", Role::Normal, "cajero1", true).await;
    let token = app.login(&admin).await;
    let old_hash = app.repository.password_hash(&cashier.id).await.unwrap();

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/admin/users/{}/password", cashier.id),
            Some(json!({ "password": "nueva123" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let new_hash = app.repository.password_hash(&cashier.id).await.unwrap();
    assert_ne!(old_hash, new_hash);

    let renewed = TestUser {
        id: cashier.id.clone(),
        name: cashier.name.clone(),
        password: "nueva123".to_string(),
    };
    app.login(&renewed).await;

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/login",
            Some(json!({
                "tienda_id": common::STORE_CENTRO,
                "usuario_id": cashier.id,
                "password": "cajero1",
            })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_password_unknown_user() {
    let app = TestApp::new();
    let admin = app.seed_user("Ana", Role::Admin, "clave123", true).await;
    let token = app.login(&admin).await;

    let (status, _) = app
        .send(
            Method::PUT,
            "/admin/users/no-such-user/password",
            Some(json!({ "password": "nueva123" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_password_too_short() {
    let app = TestApp::new();
    let admin = app.seed_user("Ana", Role::Admin, "clave123", true).await;
    let token = app.login(&admin).await;

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/admin/users/{}/password", admin.id),
            Some(json!({ "password": "abc" })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_config_requires_secret() {
    let result = pos_auth::shared::AppConfig::builder().build();
    assert!(result.is_err());
    assert!(test_config().build().is_ok());
}
