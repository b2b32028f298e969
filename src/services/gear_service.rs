use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Gear, GearForm, Pagination};

const GEAR_COLUMNS: &str = "id, runner_id, name, created_at, updated_at";

#[derive(Clone)]
pub struct GearService {
    db: SqlitePool,
}

impl GearService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_gear(&self, runner_id: i64, form: &GearForm) -> Result<Gear> {
        let sql = format!(
            "INSERT INTO gears (runner_id, name, created_at, updated_at)
             VALUES (?, ?, ?, ?)
             RETURNING {}",
            GEAR_COLUMNS
        );
        let now = Utc::now();

        let gear = sqlx::query_as::<_, Gear>(&sql)
            .bind(runner_id)
            .bind(&form.name)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(gear)
    }

    pub async fn get_gear_by_id(&self, gear_id: i64) -> Result<Option<Gear>> {
        let sql = format!("SELECT {} FROM gears WHERE id = ?", GEAR_COLUMNS);
        let gear = sqlx::query_as::<_, Gear>(&sql)
            .bind(gear_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(gear)
    }

    pub async fn list_gears(&self, runner_id: Option<i64>, page: Pagination) -> Result<Vec<Gear>> {
        let mut sql = format!("SELECT {} FROM gears", GEAR_COLUMNS);
        if runner_id.is_some() {
            sql.push_str(" WHERE runner_id = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Gear>(&sql);
        if let Some(runner_id) = runner_id {
            query = query.bind(runner_id);
        }

        let gears = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(gears)
    }

    pub async fn update_gear(&self, gear_id: i64, form: &GearForm) -> Result<Option<Gear>> {
        let sql = format!(
            "UPDATE gears
             SET runner_id = COALESCE(?, runner_id), name = ?, updated_at = ?
             WHERE id = ?
             RETURNING {}",
            GEAR_COLUMNS
        );

        let gear = sqlx::query_as::<_, Gear>(&sql)
            .bind(form.runner_id)
            .bind(&form.name)
            .bind(Utc::now())
            .bind(gear_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(gear)
    }

    pub async fn delete_gear(&self, gear_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM gears WHERE id = ?")
            .bind(gear_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
