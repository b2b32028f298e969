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
    DailyHealthMonitoring, DailyHealthMonitoringForm, DailyHealthQuery, DailyMonitoring, DailyMonitoringDetail,
    DailyMonitoringForm, DailyMonitoringQuery, Pagination,
};

/// Day entries with their health monitorings edited inline
pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_daily_monitorings).post(create_daily_monitoring))
        .route(
            "/:daily_id",
            get(get_daily_monitoring)
                .put(update_daily_monitoring)
                .delete(delete_daily_monitoring),
        )
}

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

#[tracing::instrument(skip(state))]
async fn list_daily_monitorings(
    State(state): State<AdminState>,
    Query(query): Query<DailyMonitoringQuery>,
) -> Result<Json<Vec<DailyMonitoring>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let days = state.daily_monitorings.list_daily_monitorings(&query, page).await?;
    Ok(Json(days))
}

#[tracing::instrument(skip(state, form))]
async fn create_daily_monitoring(
    State(state): State<AdminState>,
    Json(form): Json<DailyMonitoringForm>,
) -> Result<(StatusCode, Json<DailyMonitoringDetail>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let detail = state
        .daily_monitorings
        .create_daily_monitoring(runner_id, &form)
        .await?;
    tracing::info!(
        daily_id = detail.daily_monitoring.id,
        runner_id,
        feeling = detail.daily_monitoring.feeling,
        "Recorded daily monitoring for {}",
        detail.daily_monitoring
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

#[tracing::instrument(skip(state))]
async fn get_daily_monitoring(
    State(state): State<AdminState>,
    Path(daily_id): Path<i64>,
) -> Result<Json<DailyMonitoringDetail>, ApiError> {
    state
        .daily_monitorings
        .get_daily_monitoring_detail(daily_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Daily monitoring"))
}

#[tracing::instrument(skip(state, form))]
async fn update_daily_monitoring(
    State(state): State<AdminState>,
    Path(daily_id): Path<i64>,
    Json(form): Json<DailyMonitoringForm>,
) -> Result<Json<DailyMonitoringDetail>, ApiError> {
    form.validate()?;
    state
        .daily_monitorings
        .update_daily_monitoring(daily_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Daily monitoring"))
}

#[tracing::instrument(skip(state))]
async fn delete_daily_monitoring(
    State(state): State<AdminState>,
    Path(daily_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.daily_monitorings.delete_daily_monitoring(daily_id).await? {
        return Err(ApiError::NotFound("Daily monitoring"));
    }
    tracing::info!(daily_id, "Deleted daily monitoring");
    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(state))]
async fn list_health_monitorings(
    State(state): State<AdminState>,
    Query(query): Query<DailyHealthQuery>,
) -> Result<Json<Vec<DailyHealthMonitoring>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let monitorings = state.daily_health.list_monitorings(&query, page).await?;
    Ok(Json(monitorings))
}

#[tracing::instrument(skip(state, form))]
async fn create_health_monitoring(
    State(state): State<AdminState>,
    Json(form): Json<DailyHealthMonitoringForm>,
) -> Result<(StatusCode, Json<DailyHealthMonitoring>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let monitoring = state.daily_health.create_monitoring(runner_id, &form).await?;
    Ok((StatusCode::CREATED, Json(monitoring)))
}

#[tracing::instrument(skip(state))]
async fn get_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
) -> Result<Json<DailyHealthMonitoring>, ApiError> {
    state
        .daily_health
        .get_monitoring_by_id(monitoring_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Daily health monitoring"))
}

#[tracing::instrument(skip(state, form))]
async fn update_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
    Json(form): Json<DailyHealthMonitoringForm>,
) -> Result<Json<DailyHealthMonitoring>, ApiError> {
    form.validate()?;
    state
        .daily_health
        .update_monitoring(monitoring_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Daily health monitoring"))
}

#[tracing::instrument(skip(state))]
async fn delete_health_monitoring(
    State(state): State<AdminState>,
    Path(monitoring_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.daily_health.delete_monitoring(monitoring_id).await? {
        return Err(ApiError::NotFound("Daily health monitoring"));
    }
    Ok(StatusCode::NO_CONTENT)
}
