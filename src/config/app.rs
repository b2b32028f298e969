use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
/// One year
const MAX_TOKEN_TTL_MINUTES: i64 = 525_600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    /// Runner assigned to new records when the form names none
    pub default_runner_id: i64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let config = AppConfig {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            token_ttl_minutes: parse_var("TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            default_runner_id: parse_var("DEFAULT_RUNNER_ID", 1)?,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            seed_demo_data: parse_var("SEED_DEMO_DATA", false)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would only fail later, at token signing time
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TOKEN_TTL_MINUTES).contains(&self.token_ttl_minutes)
            || chrono::Duration::try_minutes(self.token_ttl_minutes).is_none()
        {
            bail!(
                "TOKEN_TTL_MINUTES must be between 1 and {}, got {}",
                MAX_TOKEN_TTL_MINUTES,
                self.token_ttl_minutes
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Still signing tokens with the built-in development secret
    pub fn uses_default_jwt_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Clamped to the range `validate` accepts
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            token_ttl_minutes: DEFAULT_TOKEN_TTL_MINUTES,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_runner_id: 1,
            admin_email: None,
            admin_password: None,
            seed_demo_data: false,
        }
    }
}

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_uses_default_when_unset() {
        let port: u16 = parse_var("TRAINING_LOG_TEST_UNSET_PORT", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TRAINING_LOG_TEST_BAD_PORT", "not-a-port");
        let result: Result<u16> = parse_var("TRAINING_LOG_TEST_BAD_PORT", 3000);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_var_reads_value() {
        env::set_var("TRAINING_LOG_TEST_RUNNER", " 7 ");
        let runner: i64 = parse_var("TRAINING_LOG_TEST_RUNNER", 1).unwrap();
        assert_eq!(runner, 7);
    }

    #[test]
    fn test_token_ttl_must_be_a_sane_number_of_minutes() {
        assert!(AppConfig::default().validate().is_ok());

        for minutes in [0, -5, MAX_TOKEN_TTL_MINUTES + 1, i64::MAX] {
            let config = AppConfig {
                token_ttl_minutes: minutes,
                ..AppConfig::default()
            };
            let error = config.validate().unwrap_err();
            assert!(error.to_string().contains("TOKEN_TTL_MINUTES"));
            // Never panics, even when the value was not validated
            assert!(config.token_ttl() > chrono::Duration::zero());
        }
    }

    #[test]
    fn test_server_address() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..AppConfig::default()
        };

        assert_eq!(config.server_address(), "127.0.0.1:8080");
        assert!(!config.is_production());
    }
}
