use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::validation::{validate_optional_text, ValidationErrors, NAME_MAX_LENGTH};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Gear {
    pub id: i64,
    pub runner_id: i64,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GearForm {
    pub runner_id: Option<i64>,
    pub name: Option<String>,
}

impl GearForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_optional_text(&mut errors, "name", self.name.as_deref(), NAME_MAX_LENGTH);
        errors.into_result()
    }
}
