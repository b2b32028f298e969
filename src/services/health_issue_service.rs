use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{HealthIssue, HealthIssueForm, Pagination};

const HEALTH_ISSUE_COLUMNS: &str = "id, runner_id, name, traumatologic, created_at, updated_at";

#[derive(Clone)]
pub struct HealthIssueService {
    db: SqlitePool,
}

impl HealthIssueService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_health_issue(&self, runner_id: i64, form: &HealthIssueForm) -> Result<HealthIssue> {
        let sql = format!(
            "INSERT INTO health_issues (runner_id, name, traumatologic, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            HEALTH_ISSUE_COLUMNS
        );
        let now = Utc::now();

        let issue = sqlx::query_as::<_, HealthIssue>(&sql)
            .bind(runner_id)
            .bind(&form.name)
            .bind(form.traumatologic)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(issue)
    }

    pub async fn get_health_issue_by_id(&self, issue_id: i64) -> Result<Option<HealthIssue>> {
        let sql = format!("SELECT {} FROM health_issues WHERE id = ?", HEALTH_ISSUE_COLUMNS);
        let issue = sqlx::query_as::<_, HealthIssue>(&sql)
            .bind(issue_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(issue)
    }

    pub async fn list_health_issues(&self, runner_id: Option<i64>, page: Pagination) -> Result<Vec<HealthIssue>> {
        let mut sql = format!("SELECT {} FROM health_issues", HEALTH_ISSUE_COLUMNS);
        if runner_id.is_some() {
            sql.push_str(" WHERE runner_id = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, HealthIssue>(&sql);
        if let Some(runner_id) = runner_id {
            query = query.bind(runner_id);
        }

        let issues = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(issues)
    }

    pub async fn update_health_issue(&self, issue_id: i64, form: &HealthIssueForm) -> Result<Option<HealthIssue>> {
        let sql = format!(
            "UPDATE health_issues
             SET runner_id = COALESCE(?, runner_id), name = ?, traumatologic = ?, updated_at = ?
             WHERE id = ?
             RETURNING {}",
            HEALTH_ISSUE_COLUMNS
        );

        let issue = sqlx::query_as::<_, HealthIssue>(&sql)
            .bind(form.runner_id)
            .bind(&form.name)
            .bind(form.traumatologic)
            .bind(Utc::now())
            .bind(issue_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(issue)
    }

    /// Removes every session and daily monitoring entry that referenced the issue
    pub async fn delete_health_issue(&self, issue_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM health_issues WHERE id = ?")
            .bind(issue_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
