use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::{Pagination, User};

const USER_COLUMNS: &str = "id, email, password_hash, is_staff, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Store a user whose password has already been hashed
    pub async fn create_user(&self, email: &str, password_hash: &str, is_staff: bool) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, is_staff, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {}",
            USER_COLUMNS
        );
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(is_staff)
            .bind(now)
            .bind(now)
            .fetch_one(&self.db)
            .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    pub async fn list_users(&self, page: Pagination) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY id ASC LIMIT ? OFFSET ?",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }

    /// Deleting a user removes every record they own
    pub async fn delete_user(&self, user_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
