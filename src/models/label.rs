use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::validation::{
    validate_optional_text, validate_required_text, ValidationErrors, COLOR_MAX_LENGTH,
    NAME_MAX_LENGTH,
};

/// Tag attached to sessions for grouping and filtering
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Label {
    pub id: i64,
    pub runner_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelForm {
    pub runner_id: Option<i64>,
    pub name: String,
    pub color: Option<String>,
}

impl LabelForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_required_text(&mut errors, "name", &self.name, NAME_MAX_LENGTH);
        validate_optional_text(&mut errors, "color", self.color.as_deref(), COLOR_MAX_LENGTH);
        errors.into_result()
    }
}
