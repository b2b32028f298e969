use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::activity::{ActivityDetail, ActivityFields};
use super::inline::{validate_inline_rows, InlineRow};
use super::monitoring::{SessionHealthFields, SessionHealthMonitoring};
use super::validation::{
    unique_ids, validate_optional_text, validate_score, ValidationErrors, NAME_MAX_LENGTH,
};

/// One training outing, possibly made of several activities
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Session {
    pub id: i64,
    pub runner_id: i64,
    pub start_time: DateTime<Utc>,
    pub name: Option<String>,
    pub comment: Option<String>,
    /// Perceived difficulty, 0..=10
    pub difficulty: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}",
            self.start_time.format("%Y-%m-%d"),
            self.name.as_deref().unwrap_or_default()
        )
    }
}

/// Session with its labels and inline children, as shown on the edit page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    pub labels: Vec<i64>,
    pub activities: Vec<ActivityDetail>,
    pub health_monitorings: Vec<SessionHealthMonitoring>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionForm {
    pub runner_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub difficulty: i32,
    #[serde(default)]
    pub labels: Vec<i64>,
    /// Inline activities: new, edited or removed together with the session
    #[serde(default)]
    pub activities: Vec<InlineRow<ActivityFields>>,
    #[serde(default)]
    pub health_monitorings: Vec<InlineRow<SessionHealthFields>>,
}

impl SessionForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_optional_text(&mut errors, "name", self.name.as_deref(), NAME_MAX_LENGTH);
        validate_score(&mut errors, "difficulty", self.difficulty);

        validate_inline_rows(&mut errors, "activities", &self.activities, ActivityFields::validate);
        validate_inline_rows(
            &mut errors,
            "health_monitorings",
            &self.health_monitorings,
            SessionHealthFields::validate,
        );

        errors.into_result()
    }

    pub fn unique_labels(&self) -> Vec<i64> {
        unique_ids(&self.labels)
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SessionQuery {
    pub runner_id: Option<i64>,
    pub label_id: Option<i64>,
    /// Only sessions starting at or after this instant
    pub from: Option<DateTime<Utc>>,
    /// Only sessions starting at or before this instant
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn session(name: Option<&str>) -> Session {
        let start = Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 0).unwrap();
        Session {
            id: 1,
            runner_id: 1,
            start_time: start,
            name: name.map(str::to_string),
            comment: None,
            difficulty: 6,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_display_uses_start_date_and_name() {
        assert_eq!(session(Some("Long run")).to_string(), "2024-03-09 | Long run");
        assert_eq!(session(None).to_string(), "2024-03-09 | ");
    }

    #[test]
    fn test_difficulty_out_of_range_is_rejected() {
        for difficulty in [-1, 11] {
            let form: SessionForm = serde_json::from_value(json!({
                "start_time": "2024-03-09T07:30:00Z",
                "difficulty": difficulty
            }))
            .unwrap();

            let errors = form.validate().unwrap_err();
            assert!(errors.get("difficulty").is_some());
        }
    }

    #[test]
    fn test_inline_errors_are_reported_per_row() {
        let form: SessionForm = serde_json::from_value(json!({
            "start_time": "2024-03-09T07:30:00Z",
            "difficulty": 4,
            "activities": [
                {"sport_id": 1, "duration_seconds": 1200},
                {"sport_id": 1, "duration_seconds": -5}
            ],
            "health_monitorings": [
                {"health_issue_id": 2, "pain": 12}
            ]
        }))
        .unwrap();

        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["activities[1].duration_seconds", "health_monitorings[0].pain"]
        );
    }

    #[test]
    fn test_labels_are_deduplicated() {
        let form: SessionForm = serde_json::from_value(json!({
            "start_time": "2024-03-09T07:30:00Z",
            "difficulty": 4,
            "labels": [5, 5, 2]
        }))
        .unwrap();

        assert_eq!(form.unique_labels(), vec![2, 5]);
    }
}
