use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use super::admin::{admin_routes, AdminState};
use super::auth::auth_routes;
use super::health::health_check;
use crate::auth::{cors_layer, AuthService};
use crate::config::AppConfig;

pub fn create_routes(db: SqlitePool, config: &AppConfig) -> Router {
    let auth_service = AuthService::new(
        db.clone(),
        &config.jwt_secret,
        config.token_ttl(),
        config.bcrypt_cost,
    );
    let admin_state = AdminState::new(db.clone(), auth_service.clone(), config.default_runner_id);

    let api = Router::new()
        .nest("/auth", auth_routes(auth_service))
        .nest("/admin", admin_routes(admin_state));

    Router::new()
        .route("/health", get(health_check))
        .with_state(db)
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}
