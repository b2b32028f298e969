use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::admin::AdminState;
use super::error::ApiError;
use crate::models::{Exercise, ExerciseForm, ExerciseQuery, Pagination};

pub fn routes() -> Router<AdminState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route(
            "/:exercise_id",
            get(get_exercise).put(update_exercise).delete(delete_exercise),
        )
}

/// List exercises, optionally narrowed to one runner or sport
#[tracing::instrument(skip(state))]
async fn list_exercises(
    State(state): State<AdminState>,
    Query(query): Query<ExerciseQuery>,
) -> Result<Json<Vec<Exercise>>, ApiError> {
    let page = Pagination::from_query(query.limit, query.offset)?;
    let exercises = state.exercises.list_exercises(&query, page).await?;
    Ok(Json(exercises))
}

#[tracing::instrument(skip(state, form))]
async fn create_exercise(
    State(state): State<AdminState>,
    Json(form): Json<ExerciseForm>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    form.validate()?;
    let runner_id = state.runner_for(form.runner_id);
    let exercise = state.exercises.create_exercise(runner_id, &form).await?;
    tracing::info!(
        exercise_id = exercise.id,
        sport_id = exercise.sport_id,
        "Created exercise {}",
        exercise
    );
    Ok((StatusCode::CREATED, Json(exercise)))
}

#[tracing::instrument(skip(state))]
async fn get_exercise(
    State(state): State<AdminState>,
    Path(exercise_id): Path<i64>,
) -> Result<Json<Exercise>, ApiError> {
    state
        .exercises
        .get_exercise_by_id(exercise_id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Exercise"))
}

#[tracing::instrument(skip(state, form))]
async fn update_exercise(
    State(state): State<AdminState>,
    Path(exercise_id): Path<i64>,
    Json(form): Json<ExerciseForm>,
) -> Result<Json<Exercise>, ApiError> {
    form.validate()?;
    state
        .exercises
        .update_exercise(exercise_id, &form)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Exercise"))
}

#[tracing::instrument(skip(state))]
async fn delete_exercise(
    State(state): State<AdminState>,
    Path(exercise_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.exercises.delete_exercise(exercise_id).await? {
        return Err(ApiError::NotFound("Exercise"));
    }
    tracing::info!(exercise_id, "Deleted exercise");
    Ok(StatusCode::NO_CONTENT)
}
