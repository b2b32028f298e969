#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use std::sync::Once;
use tower::ServiceExt;

use training_log::api::create_routes;
use training_log::auth::AuthService;
use training_log::config::{run_migrations, AppConfig, DatabaseConfig};
use training_log::models::{CreateUser, User};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
/// Cheapest bcrypt cost, keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("training_log=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> SqlitePool {
    let pool = DatabaseConfig::in_memory()
        .create_pool()
        .await
        .expect("Failed to create in-memory pool");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: "test_secret_key_for_testing_only".to_string(),
        bcrypt_cost: TEST_BCRYPT_COST,
        ..AppConfig::default()
    }
}

pub fn auth_service(pool: &SqlitePool) -> AuthService {
    let config = test_config();
    AuthService::new(pool.clone(), &config.jwt_secret, config.token_ttl(), config.bcrypt_cost)
}

pub async fn create_user(pool: &SqlitePool, email: &str, password: &str, is_staff: bool) -> User {
    let form = CreateUser {
        email: email.to_string(),
        password: password.to_string(),
        is_staff,
    };
    auth_service(pool)
        .create_user(&form)
        .await
        .expect("Failed to create user")
}

/// Router over a fresh database with a logged-in staff user. The staff user is the first
/// user created, so it doubles as the placeholder runner (id 1).
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub admin: User,
    pub token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        init_test_logging();

        let pool = test_pool().await;
        let admin = create_user(&pool, ADMIN_EMAIL, ADMIN_PASSWORD, true).await;
        let router = create_routes(pool.clone(), &test_config());

        let mut app = Self {
            router,
            pool,
            admin,
            token: String::new(),
        };
        app.token = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        app
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send_with_token(
                Method::POST,
                "/api/v1/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"]
            .as_str()
            .expect("login response carries a token")
            .to_string()
    }

    /// Request authenticated as the staff user
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.token.clone();
        self.send_with_token(method, uri, body, Some(&token)).await
    }

    pub async fn send_with_token(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        (status, body)
    }

    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let (status, body) = self.send(Method::POST, uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "create {} failed: {}", uri, body);
        body
    }
}
