mod common;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{TestApp, ADMIN_EMAIL};
use training_log::config::{AppConfig, DatabaseSeeder};

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send_with_token(
            Method::POST,
            "/api/v1/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": common::ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["is_staff"], true);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = TestApp::new().await;

    for (email, password) in [(ADMIN_EMAIL, "wrong-password"), ("nobody@example.com", "whatever1")] {
        let (status, body) = app
            .send_with_token(
                Method::POST,
                "/api/v1/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_credentials");
    }
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], app.admin.id);
    assert_eq!(body["email"], ADMIN_EMAIL);

    let (status, _) = app
        .send_with_token(Method::GET, "/api/v1/auth/me", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let user = app
        .create(
            "/api/v1/admin/users",
            json!({ "email": "gone@example.com", "password": "gone-password", "is_staff": true }),
        )
        .await;
    let token = app.login("gone@example.com", "gone-password").await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/admin/users/{}", user["id"]), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .send_with_token(Method::GET, "/api/v1/auth/me", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "invalid_token");
}

#[tokio::test]
async fn test_bootstrap_admin_only_seeds_an_empty_database() {
    common::init_test_logging();
    let pool = common::test_pool().await;
    let config = AppConfig {
        admin_email: Some("boss@example.com".to_string()),
        admin_password: Some("boss-password".to_string()),
        ..common::test_config()
    };
    let seeder = DatabaseSeeder::new(pool.clone());

    let first = seeder.seed_admin(&config).await.unwrap().expect("admin created");
    assert_eq!(first.id, config.default_runner_id);
    assert!(first.is_staff);
    assert!(seeder.seed_admin(&config).await.unwrap().is_none());

    // Ids are not reused, so a re-bootstrap no longer lands on the placeholder runner
    sqlx::query("DELETE FROM users").execute(&pool).await.unwrap();
    let second = seeder.seed_admin(&config).await.unwrap().expect("admin re-created");
    assert_eq!(second.id, 2);
    assert_ne!(second.id, config.default_runner_id);
}
