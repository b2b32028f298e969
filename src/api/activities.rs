use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{Activity, ActivityDetail, ActivityForm, ActivityQuery, Pagination};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_activities).post(create_activity))
        .route(
            "/:activity_id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
}

#[tracing::instrument(skip(state))]
async fn list_activities(
    State(state): State<AdminState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let activities = state.activities.list_activities(&query, page).await?;
    Ok(Json(activities))
}

/// Create a standalone activity inside an existing session
#[tracing::instrument(skip(state, form))]
async fn create_activity(
    State(state): State<AdminState>,
    Json(form): Json<ActivityForm>,
) -> Result<(StatusCode, Json<ActivityDetail>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let detail = state.activities.create_activity(runner_id, &form).await?;
    tracing::info!(
        activity_id = detail.activity.id,
        session_id = detail.activity.session_id,
        "Created activity"
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

#[tracing::instrument(skip(state))]
async fn get_activity(
    State(state): State<AdminState>,
    Path(activity_id): Path<i64>,
) -> Result<Json<ActivityDetail>, ApiError> {
    state
        .activities
        .get_activity_by_id(activity_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Activity"))
}

/// Gear and exercise lists in the form replace the stored ones
#[tracing::instrument(skip(state, form))]
async fn update_activity(
    State(state): State<AdminState>,
    Path(activity_id): Path<i64>,
    Json(form): Json<ActivityForm>,
) -> Result<Json<ActivityDetail>, ApiError> {
    form.validate()?;
    state
        .activities
        .update_activity(activity_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Activity"))
}

#[tracing::instrument(skip(state))]
async fn delete_activity(
    State(state): State<AdminState>,
    Path(activity_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.activities.delete_activity(activity_id).await? {
        return Err(ApiError::NotFound("Activity"));
    }
    tracing::info!(activity_id, "Deleted activity");
    Ok(StatusCode::NO_CONTENT)
}
