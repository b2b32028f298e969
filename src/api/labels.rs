use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{Label, LabelForm, OwnedQuery, Pagination};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_labels).post(create_label))
        .route("/:label_id", get(get_label).put(update_label).delete(delete_label))
}

#[tracing::instrument(skip(state))]
async fn list_labels(
    State(state): State<AdminState>,
    Query(query): Query<OwnedQuery>,
) -> Result<Json<Vec<Label>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let labels = state.labels.list_labels(query.runner_id, page).await?;
    Ok(Json(labels))
}

#[tracing::instrument(skip(state, form))]
async fn create_label(
    State(state): State<AdminState>,
    Json(form): Json<LabelForm>,
) -> Result<(StatusCode, Json<Label>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let label = state.labels.create_label(runner_id, &form).await?;
    tracing::info!(label_id = label.id, runner_id, "Created label {}", label);
    Ok((StatusCode::CREATED, Json(label)))
}

#[tracing::instrument(skip(state))]
async fn get_label(
    State(state): State<AdminState>,
    Path(label_id): Path<i64>,
) -> Result<Json<Label>, ApiError> {
    state
        .labels
        .get_label_by_id(label_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Label"))
}

#[tracing::instrument(skip(state, form))]
async fn update_label(
    State(state): State<AdminState>,
    Path(label_id): Path<i64>,
    Json(form): Json<LabelForm>,
) -> Result<Json<Label>, ApiError> {
    form.validate()?;
    state
        .labels
        .update_label(label_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Label"))
}

#[tracing::instrument(skip(state))]
async fn delete_label(
    State(state): State<AdminState>,
    Path(label_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.labels.delete_label(label_id).await? {
        return Err(ApiError::NotFound("Label"));
    }
    tracing::info!(label_id, "Deleted label");
    Ok(StatusCode::NO_CONTENT)
}
