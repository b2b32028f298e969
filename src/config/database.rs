use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::app::parse_var;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://training_log.db".to_string());

        Ok(DatabaseConfig {
            database_url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", 1)?,
            connect_timeout: Duration::from_secs(parse_var("DB_CONNECT_TIMEOUT", 30)?),
            idle_timeout: Duration::from_secs(parse_var("DB_IDLE_TIMEOUT", 600)?),
        })
    }

    /// Private in-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }

    pub async fn create_pool(&self) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool = if self.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .acquire_timeout(self.connect_timeout)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(self.max_connections)
                .min_connections(self.min_connections)
                .acquire_timeout(self.connect_timeout)
                .idle_timeout(Some(self.idle_timeout))
                .connect_with(options)
                .await?
        };

        Ok(pool)
    }
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_enforces_foreign_keys() {
        let pool = DatabaseConfig::in_memory().create_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO labels (runner_id, name, created_at, updated_at)
             VALUES (999, 'orphan', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(DatabaseConfig::in_memory().is_in_memory());

        let file = DatabaseConfig {
            database_url: "sqlite://training_log.db".to_string(),
            ..DatabaseConfig::in_memory()
        };
        assert!(!file.is_in_memory());
    }
}
