//! Assignment model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::raw::{RawRecord, RawRecordExt};

/// An assignment within a course.
///
/// `due_date` and `total_points` serialize as `null` when unknown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Assignment {
    pub id: String,
    pub name: String,
    /// Due date as reported by Gradescope.
    pub due_date: Option<String>,
    /// Maximum points, when graded.
    pub total_points: Option<f64>,
    pub url: String,
}

impl Assignment {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.str_or_empty("id"),
            name: raw.str_or_empty("name"),
            due_date: raw.opt_str("due_date"),
            total_points: raw.opt_f64("total_points"),
            url: raw.str_or_empty("url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_optionals_serialize_as_null() {
        let raw = json!({"id": "1", "name": "HW1", "url": "/courses/1/assignments/1"});
        let assignment = Assignment::from_raw(raw.as_object().unwrap());
        assert_eq!(assignment.due_date, None);
        assert_eq!(assignment.total_points, None);

        let value = serde_json::to_value(&assignment).unwrap();
        assert_eq!(value["due_date"], serde_json::Value::Null);
        assert_eq!(value["total_points"], serde_json::Value::Null);
    }

    #[test]
    fn test_present_optionals_kept() {
        let raw = json!({"id": "2", "due_date": "2024-05-01T23:59:00-07:00", "total_points": 25});
        let assignment = Assignment::from_raw(raw.as_object().unwrap());
        assert_eq!(assignment.due_date.as_deref(), Some("2024-05-01T23:59:00-07:00"));
        assert_eq!(assignment.total_points, Some(25.0));
        assert_eq!(assignment.name, "");
    }
}
