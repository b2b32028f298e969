use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use super::inline::{validate_inline_rows, InlineRow};
use super::validation::{validate_score, ValidationErrors};

/// Pain tracked for a health issue during one session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SessionHealthMonitoring {
    pub id: i64,
    pub runner_id: i64,
    pub session_id: i64,
    pub health_issue_id: i64,
    pub pain: i32,
    /// Acute event rather than routine tracking
    pub incident: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHealthFields {
    pub health_issue_id: i64,
    pub pain: i32,
    #[serde(default)]
    pub incident: bool,
}

impl SessionHealthFields {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_score(&mut errors, "pain", self.pain);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionHealthMonitoringForm {
    pub runner_id: Option<i64>,
    pub session_id: i64,
    #[serde(flatten)]
    pub fields: SessionHealthFields,
}

impl SessionHealthMonitoringForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct SessionHealthQuery {
    pub runner_id: Option<i64>,
    pub session_id: Option<i64>,
    pub health_issue_id: Option<i64>,
    pub incident: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// How the runner felt on a given day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailyMonitoring {
    pub id: i64,
    pub runner_id: i64,
    pub date: NaiveDate,
    pub feeling: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for DailyMonitoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyMonitoringDetail {
    #[serde(flatten)]
    pub daily_monitoring: DailyMonitoring,
    pub health_monitorings: Vec<DailyHealthMonitoring>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMonitoringForm {
    pub runner_id: Option<i64>,
    /// Defaults to today on create and to the stored date on update
    pub date: Option<NaiveDate>,
    pub feeling: i32,
    #[serde(default)]
    pub health_monitorings: Vec<InlineRow<DailyHealthFields>>,
}

impl DailyMonitoringForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_score(&mut errors, "feeling", self.feeling);

        validate_inline_rows(
            &mut errors,
            "health_monitorings",
            &self.health_monitorings,
            DailyHealthFields::validate,
        );

        errors.into_result()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DailyMonitoringQuery {
    pub runner_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pain tracked for a health issue on a given day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct DailyHealthMonitoring {
    pub id: i64,
    pub runner_id: i64,
    pub daily_monitoring_id: i64,
    pub health_issue_id: i64,
    pub pain: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHealthFields {
    pub health_issue_id: i64,
    pub pain: i32,
}

impl DailyHealthFields {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate_score(&mut errors, "pain", self.pain);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyHealthMonitoringForm {
    pub runner_id: Option<i64>,
    pub daily_monitoring_id: i64,
    #[serde(flatten)]
    pub fields: DailyHealthFields,
}

impl DailyHealthMonitoringForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.fields.validate()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DailyHealthQuery {
    pub runner_id: Option<i64>,
    pub daily_monitoring_id: Option<i64>,
    pub health_issue_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_incident_defaults_to_false() {
        let form: SessionHealthMonitoringForm = serde_json::from_value(json!({
            "session_id": 1,
            "health_issue_id": 2,
            "pain": 3
        }))
        .unwrap();

        assert!(!form.fields.incident);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_pain_out_of_range_is_rejected() {
        let fields = SessionHealthFields { health_issue_id: 1, pain: 11, incident: true };
        assert!(fields.validate().unwrap_err().get("pain").is_some());

        let fields = DailyHealthFields { health_issue_id: 1, pain: -1 };
        assert!(fields.validate().unwrap_err().get("pain").is_some());
    }

    #[test]
    fn test_feeling_out_of_range_is_rejected() {
        let form: DailyMonitoringForm = serde_json::from_value(json!({ "feeling": 42 })).unwrap();

        assert_eq!(form.date, None);
        assert_eq!(
            form.validate().unwrap_err().get("feeling").unwrap(),
            ["Ensure this value is less than or equal to 10."]
        );
    }

    #[test]
    fn test_daily_monitoring_display_is_the_date() {
        let now = Utc::now();
        let monitoring = DailyMonitoring {
            id: 1,
            runner_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            feeling: 7,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(monitoring.to_string(), "2024-02-29");
    }
}
