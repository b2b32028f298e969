use anyhow::Result;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{
    DailyHealthFields, DailyHealthMonitoring, DailyHealthMonitoringForm, DailyHealthQuery,
    DailyMonitoring, DailyMonitoringDetail, DailyMonitoringForm, DailyMonitoringQuery, InlineAction,
    Pagination, ValidationErrors, INVALID_INLINE_ROW,
};

const DAILY_COLUMNS: &str = "id, runner_id, date, feeling, created_at, updated_at";
const DAILY_HEALTH_COLUMNS: &str =
    "id, runner_id, daily_monitoring_id, health_issue_id, pain, created_at, updated_at";

#[derive(Clone)]
pub struct DailyMonitoringService {
    db: SqlitePool,
}

impl DailyMonitoringService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a day entry and its inline health monitorings. Without a date the entry is
    /// recorded for today.
    pub async fn create_daily_monitoring(
        &self,
        runner_id: i64,
        form: &DailyMonitoringForm,
    ) -> Result<DailyMonitoringDetail> {
        let mut tx = self.db.begin().await?;
        let sql = format!(
            "INSERT INTO daily_monitorings (runner_id, date, feeling, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            DAILY_COLUMNS
        );
        let now = Utc::now();
        let date = form.date.unwrap_or_else(|| now.date_naive());

        let daily = sqlx::query_as::<_, DailyMonitoring>(&sql)
            .bind(runner_id)
            .bind(date)
            .bind(form.feeling)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        save_daily_inlines(&mut tx, &daily, form).await?;
        let detail = load_daily_detail(&mut tx, daily).await?;
        tx.commit().await?;

        Ok(detail)
    }

    pub async fn get_daily_monitoring_detail(&self, daily_id: i64) -> Result<Option<DailyMonitoringDetail>> {
        let mut conn = self.db.acquire().await?;
        let sql = format!("SELECT {} FROM daily_monitorings WHERE id = ?", DAILY_COLUMNS);

        let daily = sqlx::query_as::<_, DailyMonitoring>(&sql)
            .bind(daily_id)
            .fetch_optional(&mut *conn)
            .await?;

        match daily {
            Some(daily) => Ok(Some(load_daily_detail(&mut conn, daily).await?)),
            None => Ok(None),
        }
    }

    /// Most recent days first
    pub async fn list_daily_monitorings(
        &self,
        filter: &DailyMonitoringQuery,
        page: Pagination,
    ) -> Result<Vec<DailyMonitoring>> {
        let mut sql = format!("SELECT {} FROM daily_monitorings WHERE 1 = 1", DAILY_COLUMNS);
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.from.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if filter.to.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date DESC, id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, DailyMonitoring>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(from) = filter.from {
            query = query.bind(from);
        }
        if let Some(to) = filter.to {
            query = query.bind(to);
        }

        let entries = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(entries)
    }

    /// Full-form update; a missing date keeps the stored one. Inline rows with an `id` edit
    /// or remove that health monitoring, rows without one are added.
    pub async fn update_daily_monitoring(
        &self,
        daily_id: i64,
        form: &DailyMonitoringForm,
    ) -> Result<Option<DailyMonitoringDetail>> {
        let mut tx = self.db.begin().await?;
        let sql = format!(
            "UPDATE daily_monitorings
             SET runner_id = COALESCE(?, runner_id),
                 date = COALESCE(?, date),
                 feeling = ?,
                 updated_at = ?
             WHERE id = ?
             RETURNING {}",
            DAILY_COLUMNS
        );

        let daily = sqlx::query_as::<_, DailyMonitoring>(&sql)
            .bind(form.runner_id)
            .bind(form.date)
            .bind(form.feeling)
            .bind(Utc::now())
            .bind(daily_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(daily) = daily else {
            return Ok(None);
        };

        sqlx::query("UPDATE daily_health_monitorings SET runner_id = ? WHERE daily_monitoring_id = ?")
            .bind(daily.runner_id)
            .bind(daily.id)
            .execute(&mut *tx)
            .await?;

        save_daily_inlines(&mut tx, &daily, form).await?;
        let detail = load_daily_detail(&mut tx, daily).await?;
        tx.commit().await?;

        Ok(Some(detail))
    }

    pub async fn delete_daily_monitoring(&self, daily_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM daily_monitorings WHERE id = ?")
            .bind(daily_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct DailyHealthMonitoringService {
    db: SqlitePool,
}

impl DailyHealthMonitoringService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_monitoring(
        &self,
        runner_id: i64,
        form: &DailyHealthMonitoringForm,
    ) -> Result<DailyHealthMonitoring> {
        let mut conn = self.db.acquire().await?;
        insert_daily_health(&mut conn, runner_id, form.daily_monitoring_id, &form.fields).await
    }

    pub async fn get_monitoring_by_id(&self, monitoring_id: i64) -> Result<Option<DailyHealthMonitoring>> {
        let sql = format!(
            "SELECT {} FROM daily_health_monitorings WHERE id = ?",
            DAILY_HEALTH_COLUMNS
        );
        let monitoring = sqlx::query_as::<_, DailyHealthMonitoring>(&sql)
            .bind(monitoring_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(monitoring)
    }

    pub async fn list_monitorings(
        &self,
        filter: &DailyHealthQuery,
        page: Pagination,
    ) -> Result<Vec<DailyHealthMonitoring>> {
        let mut sql = format!(
            "SELECT {} FROM daily_health_monitorings WHERE 1 = 1",
            DAILY_HEALTH_COLUMNS
        );
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.daily_monitoring_id.is_some() {
            sql.push_str(" AND daily_monitoring_id = ?");
        }
        if filter.health_issue_id.is_some() {
            sql.push_str(" AND health_issue_id = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, DailyHealthMonitoring>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(daily_monitoring_id) = filter.daily_monitoring_id {
            query = query.bind(daily_monitoring_id);
        }
        if let Some(health_issue_id) = filter.health_issue_id {
            query = query.bind(health_issue_id);
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
        form: &DailyHealthMonitoringForm,
    ) -> Result<Option<DailyHealthMonitoring>> {
        let sql = format!(
            "UPDATE daily_health_monitorings
             SET runner_id = COALESCE(?, runner_id),
                 daily_monitoring_id = ?,
                 health_issue_id = ?,
                 pain = ?,
                 updated_at = ?
             WHERE id = ?
             RETURNING {}",
            DAILY_HEALTH_COLUMNS
        );

        let monitoring = sqlx::query_as::<_, DailyHealthMonitoring>(&sql)
            .bind(form.runner_id)
            .bind(form.daily_monitoring_id)
            .bind(form.fields.health_issue_id)
            .bind(form.fields.pain)
            .bind(Utc::now())
            .bind(monitoring_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(monitoring)
    }

    pub async fn delete_monitoring(&self, monitoring_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM daily_health_monitorings WHERE id = ?")
            .bind(monitoring_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_daily_health(
    conn: &mut SqliteConnection,
    runner_id: i64,
    daily_monitoring_id: i64,
    fields: &DailyHealthFields,
) -> Result<DailyHealthMonitoring> {
    let sql = format!(
        "INSERT INTO daily_health_monitorings
             (runner_id, daily_monitoring_id, health_issue_id, pain, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING {}",
        DAILY_HEALTH_COLUMNS
    );
    let now = Utc::now();

    let monitoring = sqlx::query_as::<_, DailyHealthMonitoring>(&sql)
        .bind(runner_id)
        .bind(daily_monitoring_id)
        .bind(fields.health_issue_id)
        .bind(fields.pain)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    Ok(monitoring)
}

async fn update_daily_health(
    conn: &mut SqliteConnection,
    runner_id: i64,
    daily_monitoring_id: i64,
    monitoring_id: i64,
    fields: &DailyHealthFields,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE daily_health_monitorings
         SET runner_id = ?, health_issue_id = ?, pain = ?, updated_at = ?
         WHERE id = ? AND daily_monitoring_id = ?",
    )
    .bind(runner_id)
    .bind(fields.health_issue_id)
    .bind(fields.pain)
    .bind(Utc::now())
    .bind(monitoring_id)
    .bind(daily_monitoring_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

async fn delete_daily_health(conn: &mut SqliteConnection, daily_monitoring_id: i64, monitoring_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM daily_health_monitorings WHERE id = ? AND daily_monitoring_id = ?")
        .bind(monitoring_id)
        .bind(daily_monitoring_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Apply the inline health monitoring rows; a row naming another day's entry fails the save
async fn save_daily_inlines(
    conn: &mut SqliteConnection,
    daily: &DailyMonitoring,
    form: &DailyMonitoringForm,
) -> Result<()> {
    let mut errors = ValidationErrors::new();

    for (index, row) in form.health_monitorings.iter().enumerate() {
        let saved = match row.action() {
            InlineAction::Insert => {
                insert_daily_health(conn, daily.runner_id, daily.id, &row.fields).await?;
                true
            }
            InlineAction::Update(id) => {
                update_daily_health(conn, daily.runner_id, daily.id, id, &row.fields).await?
            }
            InlineAction::Delete(id) => delete_daily_health(conn, daily.id, id).await?,
            InlineAction::Skip => true,
        };
        if !saved {
            errors.add(format!("health_monitorings[{}].id", index), INVALID_INLINE_ROW);
        }
    }

    errors.into_result()?;
    Ok(())
}

async fn load_daily_detail(conn: &mut SqliteConnection, daily: DailyMonitoring) -> Result<DailyMonitoringDetail> {
    let sql = format!(
        "SELECT {} FROM daily_health_monitorings WHERE daily_monitoring_id = ? ORDER BY id ASC",
        DAILY_HEALTH_COLUMNS
    );
    let health_monitorings = sqlx::query_as::<_, DailyHealthMonitoring>(&sql)
        .bind(daily.id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(DailyMonitoringDetail {
        daily_monitoring: daily,
        health_monitorings,
    })
}
