use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::{
    unique_ids, validate_duration, validate_optional_text, ValidationErrors, INTERVALS_MAX_LENGTH,
};

/// One sport-specific segment of a session. Durations are whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub runner_id: i64,
    pub session_id: i64,
    pub sport_id: i64,
    pub duration_seconds: i64,
    pub medium_intensity_seconds: i64,
    pub high_intensity_seconds: i64,
    /// Short interval pattern such as "6x1k"
    pub intervals: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityDetail {
    #[serde(flatten)]
    pub activity: Activity,
    pub gears: Vec<i64>,
    pub exercises: Vec<i64>,
}

/// Fields shared by the standalone activity form and the inline form inside a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFields {
    pub sport_id: i64,
    pub duration_seconds: i64,
    #[serde(default)]
    pub medium_intensity_seconds: i64,
    #[serde(default)]
    pub high_intensity_seconds: i64,
    pub intervals: Option<String>,
    #[serde(default)]
    pub gears: Vec<i64>,
    #[serde(default)]
    pub exercises: Vec<i64>,
}

impl ActivityFields {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_duration(&mut errors, "duration_seconds", self.duration_seconds);
        validate_duration(&mut errors, "medium_intensity_seconds", self.medium_intensity_seconds);
        validate_duration(&mut errors, "high_intensity_seconds", self.high_intensity_seconds);
        validate_optional_text(&mut errors, "intervals", self.intervals.as_deref(), INTERVALS_MAX_LENGTH);
        errors.into_result()
    }

    pub fn unique_gears(&self) -> Vec<i64> {
        unique_ids(&self.gears)
    }

    pub fn unique_exercises(&self) -> Vec<i64> {
        unique_ids(&self.exercises)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityForm {
    pub runner_id: Option<i64>,
    pub session_id: i64,
    #[serde(flatten)]
    pub fields: ActivityFields,
}

impl ActivityForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }
}
