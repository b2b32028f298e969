use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{
    Pagination, Session, SessionDetail, SessionForm, SessionHealthMonitoring, SessionHealthMonitoringForm,
    SessionHealthQuery, SessionQuery,
};

/// Sessions with their labels, activities and health monitorings edited inline
pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/:session_id",
            get(get_session).put(update_session).delete(delete_session),
        )
}

/// Standalone session health monitoring records
pub fn health_monitoring_routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_health_monitorings).post(create_health_monitoring))
        .route(
            "/:monitoring_id",
            get(get_health_monitoring)
                .put(update_health_monitoring)
                .delete(delete_health_monitoring),
        )
}

/// Newest sessions first
#[tracing::instrument(skip(state))]
async fn list_sessions(
    State(state): State<AdminState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<Session>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let sessions = state.sessions.list_sessions(&query, page).await?;
    Ok(Json(sessions))
}

#[tracing::instrument(skip(state, form))]
async fn create_session(
    State(state): State<AdminState>,
    Json(form): Json<SessionForm>,
) -> Result<(StatusCode, Json<SessionDetail>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let detail = state.sessions.create_session(runner_id, &form).await?;
    tracing::info!(
        session_id = detail.session.id,
        runner_id,
        activities = detail.activities.len(),
        "Created session {}",
        detail.session
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

#[tracing::instrument(skip(state))]
async fn get_session(
    State(state): State<AdminState>,
    Path(session_id): Path<i64>,
) -> Result<Json<SessionDetail>, ApiError> {
    state
        .sessions
        .get_session_detail(session_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Session"))
}

#[tracing::instrument(skip(state, form))]
async fn update_session(
    State(state): State<AdminState>,
    Path(session_id): Path<i64>,
    Json(form): Json<SessionForm>,
) -> Result<Json<SessionDetail>, ApiError> {
    form.validate()?;
    state
        .sessions
        .update_session(session_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Session"))
}

/// Removes the session together with its activities and health monitorings
#[tracing::instrument(skip(state))]
async fn delete_session(
    State(state): State<AdminState>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.sessions.delete_session(session_id).await? {
        return Err(ApiError::NotFound("Session"));
    }
    tracing::info!(session_id, "Deleted session");
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
async fn list_health_monitorings(
    State(state): State<AdminState>,
    Query(query): Query<SessionHealthQuery>,
) -> Result<Json<Vec<SessionHealthMonitoring>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let monitorings = state.session_health.list_monitorings(&query, page).await?;
    Ok(Json(monitorings))
}

#[tracing::instrument(skip(state, form))]
async fn create_health_monitoring(
    State(state): State<AdminState>,
    Json(form): Json<SessionHealthMonitoringForm>,
) -> Result<(StatusCode, Json<SessionHealthMonitoring>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let monitoring = state.session_health.create_monitoring(runner_id, &form).await?;
    tracing::info!(
        monitoring_id = monitoring.id,
        session_id = monitoring.session_id,
        pain = monitoring.pain,
        "Recorded session health monitoring"
    );
    Ok((StatusCode::CREATED, Json(monitoring)))
}

#[tracing::instrument(skip(state))]
async fn get_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
) -> Result<Json<SessionHealthMonitoring>, ApiError> {
    state
        .session_health
        .get_monitoring_by_id(monitoring_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Session health monitoring"))
}

#[tracing::instrument(skip(state, form))]
async fn update_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
    Json(form): Json<SessionHealthMonitoringForm>,
) -> Result<Json<SessionHealthMonitoring>, ApiError> {
    form.validate()?;
    state
        .session_health
        .update_monitoring(monitoring_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Session health monitoring"))
}

#[tracing::instrument(skip(state))]
async fn delete_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.session_health.delete_monitoring(monitoring_id).await? {
        return Err(ApiError::NotFound("Session health monitoring"));
    }
    Ok(StatusCode::NO_CONTENT)
}
