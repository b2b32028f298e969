use anyhow::Result;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use super::activity_service::{
    activities_for_session, delete_session_activity, insert_activity, update_session_activity,
};
use super::links::{load_links, replace_links, Link};
use super::session_health_monitoring_service::{
    delete_session_health, insert_session_health, session_health_for_session, update_session_health,
};
use crate::models::{
    InlineAction, Pagination, Session, SessionDetail, SessionForm, SessionQuery, ValidationErrors,
    INVALID_INLINE_ROW,
};

const SESSION_COLUMNS: &str =
    "id, runner_id, start_time, name, comment, difficulty, created_at, updated_at";

#[derive(Clone)]
pub struct SessionService {
    db: SqlitePool,
}

impl SessionService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Create a session with its labels and inline activities/health monitorings in one
    /// transaction. Inline rows belong to the session's runner.
    pub async fn create_session(&self, runner_id: i64, form: &SessionForm) -> Result<SessionDetail> {
        let mut tx = self.db.begin().await?;
        let sql = format!(
            "INSERT INTO sessions (runner_id, start_time, name, comment, difficulty, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {}",
            SESSION_COLUMNS
        );
        let now = Utc::now();

        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(runner_id)
            .bind(form.start_time)
            .bind(&form.name)
            .bind(&form.comment)
            .bind(form.difficulty)
            .bind(now)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        replace_links(&mut tx, Link::SessionLabels, session.id, &form.unique_labels()).await?;
        save_inlines(&mut tx, &session, form).await?;
        let detail = load_session_detail(&mut tx, session).await?;
        tx.commit().await?;

        Ok(detail)
    }

    pub async fn get_session_detail(&self, session_id: i64) -> Result<Option<SessionDetail>> {
        let mut conn = self.db.acquire().await?;
        let sql = format!("SELECT {} FROM sessions WHERE id = ?", SESSION_COLUMNS);

        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(session_id)
            .fetch_optional(&mut *conn)
            .await?;

        match session {
            Some(session) => Ok(Some(load_session_detail(&mut conn, session).await?)),
            None => Ok(None),
        }
    }

    /// Newest sessions first
    pub async fn list_sessions(&self, filter: &SessionQuery, page: Pagination) -> Result<Vec<Session>> {
        let mut sql = format!("SELECT {} FROM sessions WHERE 1 = 1", SESSION_COLUMNS);
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.label_id.is_some() {
            sql.push_str(
                " AND EXISTS (SELECT 1 FROM session_labels sl WHERE sl.session_id = sessions.id AND sl.label_id = ?)",
            );
        }
        if filter.from.is_some() {
            sql.push_str(" AND start_time >= ?");
        }
        if filter.to.is_some() {
            sql.push_str(" AND start_time <= ?");
        }
        sql.push_str(" ORDER BY start_time DESC, id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Session>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(label_id) = filter.label_id {
            query = query.bind(label_id);
        }
        if let Some(from) = filter.from {
            query = query.bind(from);
        }
        if let Some(to) = filter.to {
            query = query.bind(to);
        }

        let sessions = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(sessions)
    }

    /// Full-form update. Labels are replaced. Inline rows are inserted, edited or removed
    /// according to their `id` and `delete` flag; children not listed are kept and follow
    /// the session's runner.
    pub async fn update_session(&self, session_id: i64, form: &SessionForm) -> Result<Option<SessionDetail>> {
        let mut tx = self.db.begin().await?;
        let sql = format!(
            "UPDATE sessions
             SET runner_id = COALESCE(?, runner_id),
                 start_time = ?,
                 name = ?,
                 comment = ?,
                 difficulty = ?,
                 updated_at = ?
             WHERE id = ?
             RETURNING {}",
            SESSION_COLUMNS
        );

        let session = sqlx::query_as::<_, Session>(&sql)
            .bind(form.runner_id)
            .bind(form.start_time)
            .bind(&form.name)
            .bind(&form.comment)
            .bind(form.difficulty)
            .bind(Utc::now())
            .bind(session_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        for table in ["activities", "session_health_monitorings"] {
            sqlx::query(&format!("UPDATE {} SET runner_id = ? WHERE session_id = ?", table))
                .bind(session.runner_id)
                .bind(session.id)
                .execute(&mut *tx)
                .await?;
        }

        replace_links(&mut tx, Link::SessionLabels, session.id, &form.unique_labels()).await?;
        save_inlines(&mut tx, &session, form).await?;
        let detail = load_session_detail(&mut tx, session).await?;
        tx.commit().await?;

        Ok(Some(detail))
    }

    /// Activities and health monitorings of the session go with it
    pub async fn delete_session(&self, session_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(session_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Apply the inline activity and health monitoring rows. Rows naming a child of another
/// session fail the whole save with a field error.
async fn save_inlines(conn: &mut SqliteConnection, session: &Session, form: &SessionForm) -> Result<()> {
    let mut errors = ValidationErrors::new();

    for (index, row) in form.activities.iter().enumerate() {
        let saved = match row.action() {
            InlineAction::Insert => {
                insert_activity(conn, session.runner_id, session.id, &row.fields).await?;
                true
            }
            InlineAction::Update(id) => {
                update_session_activity(conn, session.runner_id, session.id, id, &row.fields).await?
            }
            InlineAction::Delete(id) => delete_session_activity(conn, session.id, id).await?,
            InlineAction::Skip => true,
        };
        if !saved {
            errors.add(format!("activities[{}].id", index), INVALID_INLINE_ROW);
        }
    }

    for (index, row) in form.health_monitorings.iter().enumerate() {
        let saved = match row.action() {
            InlineAction::Insert => {
                insert_session_health(conn, session.runner_id, session.id, &row.fields).await?;
                true
            }
            InlineAction::Update(id) => {
                update_session_health(conn, session.runner_id, session.id, id, &row.fields).await?
            }
            InlineAction::Delete(id) => delete_session_health(conn, session.id, id).await?,
            InlineAction::Skip => true,
        };
        if !saved {
            errors.add(format!("health_monitorings[{}].id", index), INVALID_INLINE_ROW);
        }
    }

    errors.into_result()?;
    Ok(())
}

async fn load_session_detail(conn: &mut SqliteConnection, session: Session) -> Result<SessionDetail> {
    let labels = load_links(conn, Link::SessionLabels, session.id).await?;
    let activities = activities_for_session(conn, session.id).await?;
    let health_monitorings = session_health_for_session(conn, session.id).await?;

    Ok(SessionDetail {
        session,
        labels,
        activities,
        health_monitorings,
    })
}
