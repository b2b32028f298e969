use anyhow::Result;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{
    Pagination, SessionHealthFields, SessionHealthMonitoring, SessionHealthMonitoringForm,
    SessionHealthQuery,
};

const SESSION_HEALTH_COLUMNS: &str =
    "id, runner_id, session_id, health_issue_id, pain, incident, created_at, updated_at";

#[derive(Clone)]
pub struct SessionHealthMonitoringService {
    db: SqlitePool,
}

impl SessionHealthMonitoringService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_monitoring(
        &self,
        runner_id: i64,
        form: &SessionHealthMonitoringForm,
    ) -> Result<SessionHealthMonitoring> {
        let mut conn = self.db.acquire().await?;
        insert_session_health(&mut conn, runner_id, form.session_id, &form.fields).await
    }

    pub async fn get_monitoring_by_id(&self, monitoring_id: i64) -> Result<Option<SessionHealthMonitoring>> {
        let sql = format!(
            "SELECT {} FROM session_health_monitorings WHERE id = ?",
            SESSION_HEALTH_COLUMNS
        );
        let monitoring = sqlx::query_as::<_, SessionHealthMonitoring>(&sql)
            .bind(monitoring_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(monitoring)
    }

    pub async fn list_monitorings(
        &self,
        filter: &SessionHealthQuery,
        page: Pagination,
    ) -> Result<Vec<SessionHealthMonitoring>> {
        let mut sql = format!(
            "SELECT {} FROM session_health_monitorings WHERE 1 = 1",
            SESSION_HEALTH_COLUMNS
        );
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.session_id.is_some() {
            sql.push_str(" AND session_id = ?");
        }
        if filter.health_issue_id.is_some() {
            sql.push_str(" AND health_issue_id = ?");
        }
        if filter.incident.is_some() {
            sql.push_str(" AND incident = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, SessionHealthMonitoring>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(session_id) = filter.session_id {
            query = query.bind(session_id);
        }
        if let Some(health_issue_id) = filter.health_issue_id {
            query = query.bind(health_issue_id);
        }
        if let Some(incident) = filter.incident {
            query = query.bind(incident);
        }

        let monitorings = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(monitorings)
    }

    pub async fn update_monitoring(
        &self,
        monitoring_id: i64,
        form: &SessionHealthMonitoringForm,
    ) -> Result<Option<SessionHealthMonitoring>> {
        let sql = format!(
            "UPDATE session_health_monitorings
             SET runner_id = COALESCE(?, runner_id),
                 session_id = ?,
                 health_issue_id = ?,
                 pain = ?,
                 incident = ?,
                 updated_at = ?
             WHERE id = ?
             RETURNING {}",
            SESSION_HEALTH_COLUMNS
        );

        let monitoring = sqlx::query_as::<_, SessionHealthMonitoring>(&sql)
            .bind(form.runner_id)
            .bind(form.session_id)
            .bind(form.fields.health_issue_id)
            .bind(form.fields.pain)
            .bind(form.fields.incident)
            .bind(Utc::now())
            .bind(monitoring_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(monitoring)
    }

    pub async fn delete_monitoring(&self, monitoring_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM session_health_monitorings WHERE id = ?")
            .bind(monitoring_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub(crate) async fn insert_session_health(
    conn: &mut SqliteConnection,
    runner_id: i64,
    session_id: i64,
    fields: &SessionHealthFields,
) -> Result<SessionHealthMonitoring> {
    let sql = format!(
        "INSERT INTO session_health_monitorings
             (runner_id, session_id, health_issue_id, pain, incident, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING {}",
        SESSION_HEALTH_COLUMNS
    );
    let now = Utc::now();

    let monitoring = sqlx::query_as::<_, SessionHealthMonitoring>(&sql)
        .bind(runner_id)
        .bind(session_id)
        .bind(fields.health_issue_id)
        .bind(fields.pain)
        .bind(fields.incident)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    Ok(monitoring)
}

/// Edit a health monitoring of `session_id` in place. Returns false when no such child exists.
pub(crate) async fn update_session_health(
    conn: &mut SqliteConnection,
    runner_id: i64,
    session_id: i64,
    monitoring_id: i64,
    fields: &SessionHealthFields,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE session_health_monitorings
         SET runner_id = ?, health_issue_id = ?, pain = ?, incident = ?, updated_at = ?
         WHERE id = ? AND session_id = ?",
    )
    .bind(runner_id)
    .bind(fields.health_issue_id)
    .bind(fields.pain)
    .bind(fields.incident)
    .bind(Utc::now())
    .bind(monitoring_id)
    .bind(session_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn delete_session_health(
    conn: &mut SqliteConnection,
    session_id: i64,
    monitoring_id: i64,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM session_health_monitorings WHERE id = ? AND session_id = ?")
        .bind(monitoring_id)
        .bind(session_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn session_health_for_session(
    conn: &mut SqliteConnection,
    session_id: i64,
) -> Result<Vec<SessionHealthMonitoring>> {
    let sql = format!(
        "SELECT {} FROM session_health_monitorings WHERE session_id = ? ORDER BY id ASC",
        SESSION_HEALTH_COLUMNS
    );
    let monitorings = sqlx::query_as::<_, SessionHealthMonitoring>(&sql)
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(monitorings)
}
