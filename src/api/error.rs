use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("A referenced record does not exist")]
    InvalidReference,
    #[error("Record conflicts with an existing one")]
    Conflict,
    #[error("Internal server error")]
    Internal(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub error_code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Field errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidReference => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidReference => "invalid_reference",
            ApiError::Conflict => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Constraint failures reported by SQLite become client errors; anything else is internal
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ValidationErrors>() {
            Ok(errors) => return ApiError::Validation(errors),
            Err(error) => error,
        };
        if let Some(sqlx::Error::Database(db_error)) = error.downcast_ref::<sqlx::Error>() {
            if db_error.is_foreign_key_violation()
                || db_error.message().contains("FOREIGN KEY constraint failed")
            {
                return ApiError::InvalidReference;
            }
            if db_error.is_unique_violation() || db_error.message().contains("UNIQUE constraint failed") {
                return ApiError::Conflict;
            }
        }
        ApiError::Internal(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(error) = &self {
            tracing::error!(error = ?error, "Request failed");
        }

        let body = ErrorBody {
            error_code: self.error_code(),
            message: self.to_string(),
            details: match self {
                ApiError::Validation(errors) => Some(errors),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_bad_request() {
        let mut errors = ValidationErrors::new();
        errors.add("pain", "Ensure this value is less than or equal to 10.");

        let error = ApiError::from(errors);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_code(), "validation_error");
    }

    #[test]
    fn test_validation_errors_raised_by_a_service_stay_field_errors() {
        let mut errors = ValidationErrors::new();
        errors.add("activities[0].id", crate::models::INVALID_INLINE_ROW);

        let error = ApiError::from(anyhow::Error::new(errors.clone()));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        match error {
            ApiError::Validation(details) => assert_eq!(details, errors),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_plain_anyhow_error_is_internal() {
        let error = ApiError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        let error = ApiError::NotFound("Session");
        assert_eq!(error.to_string(), "Session not found");
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
