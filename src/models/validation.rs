use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Lower bound for difficulty, pain and feeling scores
pub const SCORE_MIN: i32 = 0;
/// Upper bound for difficulty, pain and feeling scores
pub const SCORE_MAX: i32 = 10;

pub const NAME_MAX_LENGTH: usize = 200;
pub const COLOR_MAX_LENGTH: usize = 10;
pub const INTERVALS_MAX_LENGTH: usize = 10;
pub const EMAIL_MAX_LENGTH: usize = 255;
pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

const REQUIRED: &str = "This field is required.";

/// Field-level validation errors, keyed by field path (`difficulty`, `activities[0].intervals`)
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Merge errors from a nested form under `prefix`
    pub fn merge(&mut self, prefix: &str, other: ValidationErrors) {
        for (field, messages) in other.fields {
            self.fields
                .entry(format!("{}.{}", prefix, field))
                .or_default()
                .extend(messages);
        }
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Score fields (difficulty, pain, feeling) must fall in [SCORE_MIN, SCORE_MAX]
pub fn validate_score(errors: &mut ValidationErrors, field: &str, value: i32) {
    validate_range(errors, field, value as i64, SCORE_MIN as i64, SCORE_MAX as i64);
}

pub fn validate_range(errors: &mut ValidationErrors, field: &str, value: i64, min: i64, max: i64) {
    if value < min {
        errors.add(field, format!("Ensure this value is greater than or equal to {}.", min));
    }
    if value > max {
        errors.add(field, format!("Ensure this value is less than or equal to {}.", max));
    }
}

pub fn validate_required_text(errors: &mut ValidationErrors, field: &str, value: &str, max_length: usize) {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        return;
    }
    validate_max_length(errors, field, value, max_length);
}

pub fn validate_optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max_length: usize,
) {
    if let Some(value) = value {
        validate_max_length(errors, field, value, max_length);
    }
}

fn validate_max_length(errors: &mut ValidationErrors, field: &str, value: &str, max_length: usize) {
    let length = value.chars().count();
    if length > max_length {
        errors.add(
            field,
            format!(
                "Ensure this value has at most {} characters (it has {}).",
                max_length, length
            ),
        );
    }
}

/// Durations are stored as whole seconds and cannot run backwards
pub fn validate_duration(errors: &mut ValidationErrors, field: &str, seconds: i64) {
    if seconds < 0 {
        errors.add(field, "Duration cannot be negative.");
    }
}

pub fn validate_coefficient(errors: &mut ValidationErrors, field: &str, value: Option<f64>) {
    if let Some(value) = value {
        if !value.is_finite() {
            errors.add(field, "Enter a number.");
        }
    }
}

pub fn validate_email(errors: &mut ValidationErrors, field: &str, email: &str) {
    if email.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }

    let valid_shape = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid_shape {
        errors.add(field, "Enter a valid email address.");
    } else {
        validate_max_length(errors, field, email, EMAIL_MAX_LENGTH);
    }
}

pub fn validate_password(errors: &mut ValidationErrors, field: &str, password: &str) {
    if password.is_empty() {
        errors.add(field, REQUIRED);
        return;
    }

    let length = password.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        errors.add(
            field,
            format!("Password must be at least {} characters long.", PASSWORD_MIN_LENGTH),
        );
    }
    if length > PASSWORD_MAX_LENGTH {
        errors.add(
            field,
            format!("Password cannot be longer than {} characters.", PASSWORD_MAX_LENGTH),
        );
    }
}

/// Deduplicate many-to-many id lists while keeping a stable order
pub fn unique_ids(ids: &[i64]) -> Vec<i64> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_are_inclusive() {
        for value in [0, 5, 10] {
            let mut errors = ValidationErrors::new();
            validate_score(&mut errors, "pain", value);
            assert!(errors.is_empty(), "{} should be accepted", value);
        }
    }

    #[test]
    fn test_score_outside_bounds_is_rejected() {
        let mut errors = ValidationErrors::new();
        validate_score(&mut errors, "difficulty", 11);
        validate_score(&mut errors, "feeling", -1);

        assert_eq!(
            errors.get("difficulty").unwrap(),
            ["Ensure this value is less than or equal to 10."]
        );
        assert_eq!(
            errors.get("feeling").unwrap(),
            ["Ensure this value is greater than or equal to 0."]
        );
    }

    #[test]
    fn test_text_validation() {
        let mut errors = ValidationErrors::new();
        validate_required_text(&mut errors, "name", "  ", NAME_MAX_LENGTH);
        validate_optional_text(&mut errors, "intervals", Some("10x400m/200m"), INTERVALS_MAX_LENGTH);
        validate_optional_text(&mut errors, "color", None, COLOR_MAX_LENGTH);

        assert_eq!(errors.get("name").unwrap(), ["This field is required."]);
        assert_eq!(
            errors.get("intervals").unwrap(),
            ["Ensure this value has at most 10 characters (it has 12)."]
        );
        assert!(errors.get("color").is_none());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        validate_optional_text(&mut errors, "color", Some("éééééééééé"), COLOR_MAX_LENGTH);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_email_validation() {
        let check = |email: &str| {
            let mut errors = ValidationErrors::new();
            validate_email(&mut errors, "email", email);
            errors.is_empty()
        };

        assert!(check("runner@example.com"));
        assert!(!check(""));
        assert!(!check("invalid"));
        assert!(!check("runner@"));
        assert!(!check("@example.com"));
        assert!(!check("runner @example.com"));
    }

    #[test]
    fn test_password_validation() {
        let mut errors = ValidationErrors::new();
        validate_password(&mut errors, "password", "short");
        assert!(errors.get("password").is_some());

        let mut errors = ValidationErrors::new();
        validate_password(&mut errors, "password", "long enough");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let mut errors = ValidationErrors::new();
        validate_duration(&mut errors, "duration_seconds", 0);
        assert!(errors.is_empty());
        validate_duration(&mut errors, "duration_seconds", -30);
        assert!(errors.get("duration_seconds").is_some());
    }

    #[test]
    fn test_merge_prefixes_nested_fields() {
        let mut nested = ValidationErrors::new();
        nested.add("pain", "Ensure this value is less than or equal to 10.");

        let mut errors = ValidationErrors::new();
        errors.merge("health_monitorings[1]", nested);

        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["health_monitorings[1].pain"]);
    }

    #[test]
    fn test_unique_ids() {
        assert_eq!(unique_ids(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(unique_ids(&[]).is_empty());
    }
}
