use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use super::PaginationQuery;
use crate::models::{Sport, SportForm};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_sports).post(create_sport))
        .route("/:sport_id", get(get_sport).put(update_sport).delete(delete_sport))
}

#[tracing::instrument(skip(state))]
async fn list_sports(
    State(state): State<AdminState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<Sport>>, ApiError> {
    let sports = state.sports.list_sports(query.pagination()?).await?;
    Ok(Json(sports))
}

#[tracing::instrument(skip(state, form))]
async fn create_sport(
    State(state): State<AdminState>,
    Json(form): Json<SportForm>,
) -> Result<(StatusCode, Json<Sport>), ApiError> {
    form.validate()?;
    let sport = state.sports.create_sport(&form).await?;
    tracing::info!(sport_id = sport.id, "Created sport {}", sport);
    Ok((StatusCode::CREATED, Json(sport)))
}

#[tracing::instrument(skip(state))]
async fn get_sport(
    State(state): State<AdminState>,
    Path(sport_id): Path<i64>,
) -> Result<Json<Sport>, ApiError> {
    state
        .sports
        .get_sport_by_id(sport_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Sport"))
}

#[tracing::instrument(skip(state, form))]
async fn update_sport(
    State(state): State<AdminState>,
    Path(sport_id): Path<i64>,
    Json(form): Json<SportForm>,
) -> Result<Json<Sport>, ApiError> {
    form.validate()?;
    state
        .sports
        .update_sport(sport_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Sport"))
}

#[tracing::instrument(skip(state))]
async fn delete_sport(
    State(state): State<AdminState>,
    Path(sport_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.sports.delete_sport(sport_id).await? {
        return Err(ApiError::NotFound("Sport"));
    }
    tracing::info!(sport_id, "Deleted sport");
    Ok(StatusCode::NO_CONTENT)
}
