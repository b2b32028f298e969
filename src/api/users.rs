use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Extension, Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use super::PaginationQuery;
use crate::auth::UserSession;
use crate::models::{CreateUser, UserResponse, ValidationErrors};

/// Runner accounts. Deleting a user removes everything the runner owns.
pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id", get(get_user).delete(delete_user))
}

#[tracing::instrument(skip(state))]
async fn list_users(
    State(state): State<AdminState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_users(query.pagination()?).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[tracing::instrument(skip(state, form))]
async fn create_user(
    State(state): State<AdminState>,
    Json(form): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    form.validate()?;
    let user = state.auth_service.create_user(&form).await?;
    tracing::info!(user_id = user.id, is_staff = user.is_staff, "Created user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[tracing::instrument(skip(state))]
async fn get_user(
    State(state): State<AdminState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .users
        .get_user_by_id(user_id)
        .await?
        .map(|user| Json(UserResponse::from(user)))
        .ok_or(ApiError::NotFound("User"))
}

#[tracing::instrument(skip(state, session))]
async fn delete_user(
    State(state): State<AdminState>,
    Extension(session): Extension<UserSession>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if session.user_id == user_id {
        let mut errors = ValidationErrors::new();
        errors.add("user_id", "You cannot delete your own account.");
        return Err(errors.into());
    }

    if !state.users.delete_user(user_id).await? {
        return Err(ApiError::NotFound("User"));
    }
    tracing::warn!(user_id, deleted_by = session.user_id, "Deleted user and all owned records");
    Ok(StatusCode::NO_CONTENT)
}
