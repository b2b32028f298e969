use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::validation::{validate_required_text, ValidationErrors, NAME_MAX_LENGTH};

/// Something a runner tracks pain for. Traumatologic issues are injuries; the
/// rest are illnesses and other non-injury conditions.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HealthIssue {
    pub id: i64,
    pub runner_id: i64,
    pub name: String,
    pub traumatologic: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for HealthIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthIssueForm {
    pub runner_id: Option<i64>,
    pub name: String,
    pub traumatologic: bool,
}

impl HealthIssueForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required_text(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        errors.into_result()
    }
}
