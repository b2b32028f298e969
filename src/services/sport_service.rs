use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Pagination, Sport, SportForm};

const SPORT_COLUMNS: &str = "id, name, color, coefficient, created_at, updated_at";

#[derive(Clone)]
pub struct SportService {
    db: SqlitePool,
}

impl SportService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_sport(&self, form: &SportForm) -> Result<Sport> {
        let sql = format!(
            "INSERT INTO sports (name, color, coefficient, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            SPORT_COLUMNS
        );
        let now = Utc::now();

        let sport = sqlx::query_as::<_, Sport>(&sql)
            .bind(&form.name)
            .bind(&form.color)
            .bind(form.coefficient)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(sport)
    }

    pub async fn get_sport_by_id(&self, sport_id: i64) -> Result<Option<Sport>> {
        let sql = format!("SELECT {} FROM sports WHERE id = ?", SPORT_COLUMNS);
        let sport = sqlx::query_as::<_, Sport>(&sql)
            .bind(sport_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(sport)
    }

    pub async fn list_sports(&self, page: Pagination) -> Result<Vec<Sport>> {
        let sql = format!(
            "SELECT {} FROM sports ORDER BY name ASC, id ASC LIMIT ? OFFSET ?",
            SPORT_COLUMNS
        );
        let sports = sqlx::query_as::<_, Sport>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(sports)
    }

    pub async fn update_sport(&self, sport_id: i64, form: &SportForm) -> Result<Option<Sport>> {
        let sql = format!(
            "UPDATE sports
             SET name = ?, color = ?, coefficient = ?, updated_at = ?
             WHERE id = ?
             RETURNING {}",
            SPORT_COLUMNS
        );

        let sport = sqlx::query_as::<_, Sport>(&sql)
            .bind(&form.name)
            .bind(&form.color)
            .bind(form.coefficient)
            .bind(Utc::now())
            .bind(sport_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(sport)
    }

    /// Deleting a sport also removes its exercises and the activities logged under it
    pub async fn delete_sport(&self, sport_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sports WHERE id = ?")
            .bind(sport_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
