use serde::{Deserialize, Serialize};

use super::validation::ValidationErrors;

/// Reported when an inline row names a child that does not belong to the parent
pub const INVALID_INLINE_ROW: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// One row of an inline child list on a parent form.
///
/// Rows without `id` are new children. Rows with `id` edit the existing child, or remove
/// it when `delete` is set. Children missing from the list are left untouched, so a
/// detail sent back unchanged saves to the same state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineRow<T> {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub delete: bool,
    #[serde(flatten)]
    pub fields: T,
}

/// What saving a row does to the stored children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineAction {
    Insert,
    Update(i64),
    Delete(i64),
    /// A new row already marked for deletion
    Skip,
}

impl<T> InlineRow<T> {
    pub fn action(&self) -> InlineAction {
        match (self.id, self.delete) {
            (None, false) => InlineAction::Insert,
            (None, true) => InlineAction::Skip,
            (Some(id), false) => InlineAction::Update(id),
            (Some(id), true) => InlineAction::Delete(id),
        }
    }
}

/// Validate every row not marked for deletion, prefixing errors with `field[index]`
pub fn validate_inline_rows<T>(
    errors: &mut ValidationErrors,
    field: &str,
    rows: &[InlineRow<T>],
    validate: impl Fn(&T) -> Result<(), ValidationErrors>,
) {
    for (index, row) in rows.iter().enumerate() {
        if row.delete {
            continue;
        }
        if let Err(nested) = validate(&row.fields) {
            errors.merge(&format!("{}[{}]", field, index), nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyHealthFields, SessionHealthFields};
    use serde_json::json;

    #[test]
    fn test_row_action_follows_id_and_delete_flag() {
        let rows: Vec<InlineRow<DailyHealthFields>> = serde_json::from_value(json!([
            {"health_issue_id": 1, "pain": 2},
            {"id": 7, "health_issue_id": 1, "pain": 2},
            {"id": 8, "delete": true, "health_issue_id": 1, "pain": 2},
            {"delete": true, "health_issue_id": 1, "pain": 2}
        ]))
        .unwrap();

        let actions: Vec<InlineAction> = rows.iter().map(InlineRow::action).collect();
        assert_eq!(
            actions,
            vec![
                InlineAction::Insert,
                InlineAction::Update(7),
                InlineAction::Delete(8),
                InlineAction::Skip
            ]
        );
    }

    #[test]
    fn test_detail_rows_deserialize_as_inline_rows() {
        // Shape returned by the detail endpoints, extra columns included
        let row: InlineRow<SessionHealthFields> = serde_json::from_value(json!({
            "id": 3,
            "runner_id": 1,
            "session_id": 9,
            "health_issue_id": 4,
            "pain": 5,
            "incident": true,
            "created_at": "2024-03-09T07:30:00Z",
            "updated_at": "2024-03-09T07:30:00Z"
        }))
        .unwrap();

        assert_eq!(row.action(), InlineAction::Update(3));
        assert_eq!(row.fields.pain, 5);
        assert!(row.fields.incident);
    }

    #[test]
    fn test_rows_marked_for_deletion_skip_validation() {
        let rows: Vec<InlineRow<DailyHealthFields>> = serde_json::from_value(json!([
            {"id": 1, "delete": true, "health_issue_id": 1, "pain": 99},
            {"health_issue_id": 1, "pain": 11}
        ]))
        .unwrap();

        let mut errors = ValidationErrors::new();
        validate_inline_rows(&mut errors, "health_monitorings", &rows, DailyHealthFields::validate);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["health_monitorings[1].pain"]);
    }
}
