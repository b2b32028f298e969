use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{HealthIssue, HealthIssueForm, OwnedQuery, Pagination};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_health_issues).post(create_health_issue))
        .route(
            "/:issue_id",
            get(get_health_issue).put(update_health_issue).delete(delete_health_issue),
        )
}

#[tracing::instrument(skip(state))]
async fn list_health_issues(
    State(state): State<AdminState>,
    Query(query): Query<OwnedQuery>,
) -> Result<Json<Vec<HealthIssue>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let issues = state.health_issues.list_health_issues(query.runner_id, page).await?;
    Ok(Json(issues))
}

#[tracing::instrument(skip(state, form))]
async fn create_health_issue(
    State(state): State<AdminState>,
    Json(form): Json<HealthIssueForm>,
) -> Result<(StatusCode, Json<HealthIssue>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let issue = state.health_issues.create_health_issue(runner_id, &form).await?;
    tracing::info!(issue_id = issue.id, runner_id, "Created health issue {}", issue);
    Ok((StatusCode::CREATED, Json(issue)))
}

#[tracing::instrument(skip(state))]
async fn get_health_issue(
    State(state): State<AdminState>,
    Path(issue_id): Path<i64>,
) -> Result<Json<HealthIssue>, ApiError> {
    state
        .health_issues
        .get_health_issue_by_id(issue_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Health issue"))
}

#[tracing::instrument(skip(state, form))]
async fn update_health_issue(
    State(state): State<AdminState>,
    Path(issue_id): Path<i64>,
    Json(form): Json<HealthIssueForm>,
) -> Result<Json<HealthIssue>, ApiError> {
    form.validate()?;
    state
        .health_issues
        .update_health_issue(issue_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Health issue"))
}

/// Deleting a health issue removes every monitoring that references it
#[tracing::instrument(skip(state))]
async fn delete_health_issue(
    State(state): State<AdminState>,
    Path(issue_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.health_issues.delete_health_issue(issue_id).await? {
        return Err(ApiError::NotFound("Health issue"));
    }
    tracing::info!(issue_id, "Deleted health issue");
    Ok(StatusCode::NO_CONTENT)
}
