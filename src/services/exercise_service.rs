use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Exercise, ExerciseForm, ExerciseQuery, Pagination};

const EXERCISE_COLUMNS: &str = "id, runner_id, sport_id, name, comment, created_at, updated_at";

#[derive(Clone)]
pub struct ExerciseService {
    db: SqlitePool,
}

impl ExerciseService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_exercise(&self, runner_id: i64, form: &ExerciseForm) -> Result<Exercise> {
        let sql = format!(
            "INSERT INTO exercises (runner_id, sport_id, name, comment, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {}",
            EXERCISE_COLUMNS
        );
        let now = Utc::now();

        let exercise = sqlx::query_as::<_, Exercise>(&sql)
            .bind(runner_id)
            .bind(form.sport_id)
            .bind(&form.name)
            .bind(&form.comment)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(exercise)
    }

    pub async fn get_exercise_by_id(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let sql = format!("SELECT {} FROM exercises WHERE id = ?", EXERCISE_COLUMNS);
        let exercise = sqlx::query_as::<_, Exercise>(&sql)
            .bind(exercise_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(exercise)
    }

    pub async fn list_exercises(&self, filter: &ExerciseQuery, page: Pagination) -> Result<Vec<Exercise>> {
        let mut sql = format!("SELECT {} FROM exercises WHERE 1 = 1", EXERCISE_COLUMNS);
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.sport_id.is_some() {
            sql.push_str(" AND sport_id = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Exercise>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(sport_id) = filter.sport_id {
            query = query.bind(sport_id);
        }

        let exercises = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(exercises)
    }

    pub async fn update_exercise(&self, exercise_id: i64, form: &ExerciseForm) -> Result<Option<Exercise>> {
        let sql = format!(
            "UPDATE exercises
             SET runner_id = COALESCE(?, runner_id), sport_id = ?, name = ?, comment = ?, updated_at = ?
             WHERE id = ?
             RETURNING {}",
            EXERCISE_COLUMNS
        );

        let exercise = sqlx::query_as::<_, Exercise>(&sql)
            .bind(form.runner_id)
            .bind(form.sport_id)
            .bind(&form.name)
            .bind(&form.comment)
            .bind(Utc::now())
            .bind(exercise_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(exercise)
    }

    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(exercise_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
