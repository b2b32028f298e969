use anyhow::Result;
use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::models::{Pagination, SportForm, User};
use crate::services::SportService;

pub struct DatabaseSeeder {
    pool: SqlitePool,
}

impl DatabaseSeeder {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn seed_all(&self, config: &AppConfig) -> Result<()> {
        self.seed_admin(config).await?;

        if config.seed_demo_data {
            self.seed_sports().await?;
        }

        Ok(())
    }

    /// Create the bootstrap staff user from ADMIN_EMAIL/ADMIN_PASSWORD on an empty database
    pub async fn seed_admin(&self, config: &AppConfig) -> Result<Option<User>> {
        let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
            tracing::debug!("No bootstrap admin configured");
            return Ok(None);
        };

        let auth_service = AuthService::new(
            self.pool.clone(),
            &config.jwt_secret,
            config.token_ttl(),
            config.bcrypt_cost,
        );
        let admin = auth_service.ensure_superuser(email, password).await?;

        if let Some(user) = &admin {
            if user.id != config.default_runner_id {
                tracing::warn!(
                    user_id = user.id,
                    default_runner_id = config.default_runner_id,
                    "Bootstrap admin is not the placeholder runner; set DEFAULT_RUNNER_ID to an existing user"
                );
            }
        }

        Ok(admin)
    }

    /// Common sports with load coefficients, only when the table is empty
    pub async fn seed_sports(&self) -> Result<()> {
        let sport_service = SportService::new(self.pool.clone());

        let existing = sport_service.list_sports(Pagination { limit: 1, offset: 0 }).await?;
        if !existing.is_empty() {
            return Ok(());
        }

        let demo_sports = [
            ("Running", "#e4572e", 1.0),
            ("Trail running", "#76b041", 1.1),
            ("Cycling", "#17bebb", 0.6),
            ("Swimming", "#2e86ab", 0.9),
            ("Strength", "#ffc914", 0.5),
        ];

        for (name, color, coefficient) in demo_sports {
            let sport = sport_service
                .create_sport(&SportForm {
                    name: name.to_string(),
                    color: Some(color.to_string()),
                    coefficient: Some(coefficient),
                })
                .await?;
            tracing::info!(sport_id = sport.id, "Seeded sport {}", sport);
        }

        Ok(())
    }
}
