use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{Gear, GearForm, OwnedQuery, Pagination};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_gears).post(create_gear))
        .route("/:gear_id", get(get_gear).put(update_gear).delete(delete_gear))
}

#[tracing::instrument(skip(state))]
async fn list_gears(
    State(state): State<AdminState>,
    Query(query): Query<OwnedQuery>,
) -> Result<Json<Vec<Gear>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let gears = state.gears.list_gears(query.runner_id, page).await?;
    Ok(Json(gears))
}

#[tracing::instrument(skip(state, form))]
async fn create_gear(
    State(state): State<AdminState>,
    Json(form): Json<GearForm>,
) -> Result<(StatusCode, Json<Gear>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let gear = state.gears.create_gear(runner_id, &form).await?;
    tracing::info!(gear_id = gear.id, runner_id, "Created gear");
    Ok((StatusCode::CREATED, Json(gear)))
}

#[tracing::instrument(skip(state))]
async fn get_gear(
    State(state): State<AdminState>,
    Path(gear_id): Path<i64>,
) -> Result<Json<Gear>, ApiError> {
    state
        .gears
        .get_gear_by_id(gear_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Gear"))
}

#[tracing::instrument(skip(state, form))]
async fn update_gear(
    State(state): State<AdminState>,
    Path(gear_id): Path<i64>,
    Json(form): Json<GearForm>,
) -> Result<Json<Gear>, ApiError> {
    form.validate()?;
    state
        .gears
        .update_gear(gear_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Gear"))
}

#[tracing::instrument(skip(state))]
async fn delete_gear(
    State(state): State<AdminState>,
    Path(gear_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.gears.delete_gear(gear_id).await? {
        return Err(ApiError::NotFound("Gear"));
    }
    tracing::info!(gear_id, "Deleted gear");
    Ok(StatusCode::NO_CONTENT)
}
