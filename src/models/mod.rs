// Data models and form validation

pub mod user;
pub mod sport;
pub mod health_issue;
pub mod label;
pub mod session;
pub mod gear;
pub mod exercise;
pub mod activity;
pub mod monitoring;
pub mod inline;
pub mod validation;

pub use user::*;
pub use sport::*;
pub use health_issue::*;
pub use label::*;
pub use session::*;
pub use gear::*;
pub use exercise::*;
pub use activity::*;
pub use monitoring::*;
pub use inline::*;
pub use validation::*;

use serde::Deserialize;

/// Filter for runner-owned lookup tables (health issues, labels, gears)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct OwnedQuery {
    pub runner_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ExerciseQuery {
    pub runner_id: Option<i64>,
    pub sport_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct ActivityQuery {
    pub runner_id: Option<i64>,
    pub session_id: Option<i64>,
    pub sport_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated limit/offset pair shared by every list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(limit) = limit {
            validate_range(&mut errors, "limit", limit, 1, Self::MAX_LIMIT);
        }
        if let Some(offset) = offset {
            validate_range(&mut errors, "offset", offset, 0, i64::MAX);
        }
        errors.into_result()?;

        Ok(Self {
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT),
            offset: offset.unwrap_or(0),
        })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
