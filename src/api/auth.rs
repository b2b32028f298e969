use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::auth::{jwt_auth_middleware, AuthError, AuthResponse, AuthService, LoginRequest, UserSession};
use crate::models::UserResponse;

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/login", post(login))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(
                auth_service.clone(),
                jwt_auth_middleware,
            )),
        )
        .with_state(auth_service)
}

/// Login user
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}

/// Current user profile
#[tracing::instrument(skip(auth_service, session))]
async fn me(
    State(auth_service): State<AuthService>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<UserResponse>, AuthError> {
    let user = auth_service.current_user(&session).await?;
    Ok(Json(UserResponse::from(user)))
}
