use anyhow::Result;
use sqlx::SqliteConnection;

/// Many-to-many join tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Link {
    SessionLabels,
    ActivityGears,
    ActivityExercises,
}

impl Link {
    fn table(self) -> &'static str {
        match self {
            Link::SessionLabels => "session_labels",
            Link::ActivityGears => "activity_gears",
            Link::ActivityExercises => "activity_exercises",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            Link::SessionLabels => "session_id",
            Link::ActivityGears | Link::ActivityExercises => "activity_id",
        }
    }

    fn target_column(self) -> &'static str {
        match self {
            Link::SessionLabels => "label_id",
            Link::ActivityGears => "gear_id",
            Link::ActivityExercises => "exercise_id",
        }
    }
}

/// Replace the whole set of targets linked to `owner_id`. `target_ids` must be free of duplicates.
pub(crate) async fn replace_links(
    conn: &mut SqliteConnection,
    link: Link,
    owner_id: i64,
    target_ids: &[i64],
) -> Result<()> {
    let delete = format!("DELETE FROM {} WHERE {} = ?", link.table(), link.owner_column());
    sqlx::query(&delete).bind(owner_id).execute(&mut *conn).await?;

    let insert = format!(
        "INSERT INTO {} ({}, {}) VALUES (?, ?)",
        link.table(),
        link.owner_column(),
        link.target_column()
    );
    for &target_id in target_ids {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(target_id)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

pub(crate) async fn load_links(conn: &mut SqliteConnection, link: Link, owner_id: i64) -> Result<Vec<i64>> {
    let sql = format!(
        "SELECT {target} FROM {table} WHERE {owner} = ? ORDER BY {target} ASC",
        target = link.target_column(),
        table = link.table(),
        owner = link.owner_column()
    );

    let ids = sqlx::query_scalar::<_, i64>(&sql)
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(ids)
}
