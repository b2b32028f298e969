use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::validation::{
    validate_coefficient, validate_optional_text, validate_required_text, ValidationErrors,
    COLOR_MAX_LENGTH, NAME_MAX_LENGTH,
};

/// A sport shared by every runner. `coefficient` weights load when comparing sports.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub color: Option<String>,
    pub coefficient: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportForm {
    pub name: String,
    pub color: Option<String>,
    pub coefficient: Option<f64>,
}

impl SportForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required_text(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        validate_optional_text(&mut errors, "color", self.color.as_deref(), COLOR_MAX_LENGTH);
        validate_coefficient(&mut errors, "coefficient", self.coefficient);
        errors.into_result()
    }
}
