use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Label, LabelForm, Pagination};

const LABEL_COLUMNS: &str = "id, runner_id, name, color, created_at, updated_at";

#[derive(Clone)]
pub struct LabelService {
    db: SqlitePool,
}

impl LabelService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_label(&self, runner_id: i64, form: &LabelForm) -> Result<Label> {
        let sql = format!(
            "INSERT INTO labels (runner_id, name, color, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            LABEL_COLUMNS
        );
        let now = Utc::now();

        let label = sqlx::query_as::<_, Label>(&sql)
            .bind(runner_id)
            .bind(&form.name)
            .bind(&form.color)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(label)
    }

    pub async fn get_label_by_id(&self, label_id: i64) -> Result<Option<Label>> {
        let sql = format!("SELECT {} FROM labels WHERE id = ?", LABEL_COLUMNS);
        let label = sqlx::query_as::<_, Label>(&sql)
            .bind(label_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(label)
    }

    pub async fn list_labels(&self, runner_id: Option<i64>, page: Pagination) -> Result<Vec<Label>> {
        let mut sql = format!("SELECT {} FROM labels", LABEL_COLUMNS);
        if runner_id.is_some() {
            sql.push_str(" WHERE runner_id = ?");
        }
        sql.push_str(" ORDER BY name ASC, id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Label>(&sql);
        if let Some(runner_id) = runner_id {
            query = query.bind(runner_id);
        }

        let labels = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(labels)
    }

    pub async fn update_label(&self, label_id: i64, form: &LabelForm) -> Result<Option<Label>> {
        let sql = format!(
            "UPDATE labels
             SET runner_id = COALESCE(?, runner_id), name = ?, color = ?, updated_at = ?
             WHERE id = ?
             RETURNING {}",
            LABEL_COLUMNS
        );

        let label = sqlx::query_as::<_, Label>(&sql)
            .bind(form.runner_id)
            .bind(&form.name)
            .bind(&form.color)
            .bind(Utc::now())
            .bind(label_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(label)
    }

    /// Untags every session carrying the label; the sessions themselves stay
    pub async fn delete_label(&self, label_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM labels WHERE id = ?")
            .bind(label_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
