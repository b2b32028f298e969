use anyhow::Result;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use super::links::{load_links, replace_links, Link};
use crate::models::{Activity, ActivityDetail, ActivityFields, ActivityForm, ActivityQuery, Pagination};

const ACTIVITY_COLUMNS: &str = "id, runner_id, session_id, sport_id, duration_seconds, \
     medium_intensity_seconds, high_intensity_seconds, intervals, created_at, updated_at";

#[derive(Clone)]
pub struct ActivityService {
    db: SqlitePool,
}

impl ActivityService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create_activity(&self, runner_id: i64, form: &ActivityForm) -> Result<ActivityDetail> {
        let mut tx = self.db.begin().await?;
        let activity = insert_activity(&mut tx, runner_id, form.session_id, &form.fields).await?;
        tx.commit().await?;

        Ok(activity)
    }

    pub async fn get_activity_by_id(&self, activity_id: i64) -> Result<Option<ActivityDetail>> {
        let mut conn = self.db.acquire().await?;
        let sql = format!("SELECT {} FROM activities WHERE id = ?", ACTIVITY_COLUMNS);

        let activity = sqlx::query_as::<_, Activity>(&sql)
            .bind(activity_id)
            .fetch_optional(&mut *conn)
            .await?;

        match activity {
            Some(activity) => Ok(Some(load_activity_detail(&mut conn, activity).await?)),
            None => Ok(None),
        }
    }

    pub async fn list_activities(&self, filter: &ActivityQuery, page: Pagination) -> Result<Vec<Activity>> {
        let mut sql = format!("SELECT {} FROM activities WHERE 1 = 1", ACTIVITY_COLUMNS);
        if filter.runner_id.is_some() {
            sql.push_str(" AND runner_id = ?");
        }
        if filter.session_id.is_some() {
            sql.push_str(" AND session_id = ?");
        }
        if filter.sport_id.is_some() {
            sql.push_str(" AND sport_id = ?");
        }
        sql.push_str(" ORDER BY id ASC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, Activity>(&sql);
        if let Some(runner_id) = filter.runner_id {
            query = query.bind(runner_id);
        }
        if let Some(session_id) = filter.session_id {
            query = query.bind(session_id);
        }
        if let Some(sport_id) = filter.sport_id {
            query = query.bind(sport_id);
        }

        let activities = query
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(activities)
    }

    /// Full-form update; the gear and exercise sets are replaced
    pub async fn update_activity(&self, activity_id: i64, form: &ActivityForm) -> Result<Option<ActivityDetail>> {
        let mut tx = self.db.begin().await?;
        let sql = format!(
            "UPDATE activities
             SET runner_id = COALESCE(?, runner_id),
                 session_id = ?,
                 sport_id = ?,
                 duration_seconds = ?,
                 medium_intensity_seconds = ?,
                 high_intensity_seconds = ?,
                 intervals = ?,
                 updated_at = ?
             WHERE id = ?
             RETURNING {}",
            ACTIVITY_COLUMNS
        );

        let activity = sqlx::query_as::<_, Activity>(&sql)
            .bind(form.runner_id)
            .bind(form.session_id)
            .bind(form.fields.sport_id)
            .bind(form.fields.duration_seconds)
            .bind(form.fields.medium_intensity_seconds)
            .bind(form.fields.high_intensity_seconds)
            .bind(&form.fields.intervals)
            .bind(Utc::now())
            .bind(activity_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(activity) = activity else {
            return Ok(None);
        };

        replace_links(&mut tx, Link::ActivityGears, activity.id, &form.fields.unique_gears()).await?;
        replace_links(&mut tx, Link::ActivityExercises, activity.id, &form.fields.unique_exercises()).await?;
        let detail = load_activity_detail(&mut tx, activity).await?;
        tx.commit().await?;

        Ok(Some(detail))
    }

    pub async fn delete_activity(&self, activity_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(activity_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert an activity with its gear and exercise sets on an open connection
pub(crate) async fn insert_activity(
    conn: &mut SqliteConnection,
    runner_id: i64,
    session_id: i64,
    fields: &ActivityFields,
) -> Result<ActivityDetail> {
    let sql = format!(
        "INSERT INTO activities (runner_id, session_id, sport_id, duration_seconds,
             medium_intensity_seconds, high_intensity_seconds, intervals, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
         RETURNING {}",
        ACTIVITY_COLUMNS
    );
    let now = Utc::now();

    let activity = sqlx::query_as::<_, Activity>(&sql)
        .bind(runner_id)
        .bind(session_id)
        .bind(fields.sport_id)
        .bind(fields.duration_seconds)
        .bind(fields.medium_intensity_seconds)
        .bind(fields.high_intensity_seconds)
        .bind(&fields.intervals)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    replace_links(conn, Link::ActivityGears, activity.id, &fields.unique_gears()).await?;
    replace_links(conn, Link::ActivityExercises, activity.id, &fields.unique_exercises()).await?;

    load_activity_detail(conn, activity).await
}

/// Edit an activity of `session_id` in place. Returns false when no such child exists.
pub(crate) async fn update_session_activity(
    conn: &mut SqliteConnection,
    runner_id: i64,
    session_id: i64,
    activity_id: i64,
    fields: &ActivityFields,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE activities
         SET runner_id = ?,
             sport_id = ?,
             duration_seconds = ?,
             medium_intensity_seconds = ?,
             high_intensity_seconds = ?,
             intervals = ?,
             updated_at = ?
         WHERE id = ? AND session_id = ?",
    )
    .bind(runner_id)
    .bind(fields.sport_id)
    .bind(fields.duration_seconds)
    .bind(fields.medium_intensity_seconds)
    .bind(fields.high_intensity_seconds)
    .bind(&fields.intervals)
    .bind(Utc::now())
    .bind(activity_id)
    .bind(session_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    replace_links(conn, Link::ActivityGears, activity_id, &fields.unique_gears()).await?;
    replace_links(conn, Link::ActivityExercises, activity_id, &fields.unique_exercises()).await?;
    Ok(true)
}

pub(crate) async fn delete_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    activity_id: i64,
) -> Result<bool> {
    let result = sqlx::query("DELETE FROM activities WHERE id = ? AND session_id = ?")
        .bind(activity_id)
        .bind(session_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub(crate) async fn load_activity_detail(conn: &mut SqliteConnection, activity: Activity) -> Result<ActivityDetail> {
    let gears = load_links(conn, Link::ActivityGears, activity.id).await?;
    let exercises = load_links(conn, Link::ActivityExercises, activity.id).await?;

    Ok(ActivityDetail {
        activity,
        gears,
        exercises,
    })
}

pub(crate) async fn activities_for_session(conn: &mut SqliteConnection, session_id: i64) -> Result<Vec<ActivityDetail>> {
    let sql = format!(
        "SELECT {} FROM activities WHERE session_id = ? ORDER BY id ASC",
        ACTIVITY_COLUMNS
    );
    let activities = sqlx::query_as::<_, Activity>(&sql)
        .bind(session_id)
        .fetch_all(&mut *conn)
        .await?;

    let mut details = Vec::with_capacity(activities.len());
    for activity in activities {
        details.push(load_activity_detail(conn, activity).await?);
    }

    Ok(details)
}
