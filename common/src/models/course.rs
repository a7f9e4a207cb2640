//! Course models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::raw::{RawRecord, RawRecordExt};

/// The caller's role in a course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CourseRole {
    Instructor,
    Student,
}

impl std::fmt::Display for CourseRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseRole::Instructor => write!(f, "instructor"),
            CourseRole::Student => write!(f, "student"),
        }
    }
}

/// A course visible to the logged-in account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Course {
    /// Gradescope course identifier.
    pub id: String,
    /// Full course name.
    pub name: String,
    /// Short course code, e.g. `CS 101`.
    pub short_name: String,
    /// Role, derived from the group the course was listed under.
    pub role: CourseRole,
    /// Course page URL.
    pub url: String,
}

impl Course {
    /// Builds a course from a raw record, tagging it with `role`.
    pub fn from_raw(raw: &RawRecord, role: CourseRole) -> Self {
        Self {
            id: raw.str_or_empty("id"),
            name: raw.str_or_empty("name"),
            short_name: raw.str_or_empty("short_name"),
            role,
            url: raw.str_or_empty("url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_serializes_lowercase() {
        let value = serde_json::to_value(CourseRole::Instructor).unwrap();
        assert_eq!(value, json!("instructor"));
    }

    #[test]
    fn test_from_raw_defaults_missing_fields() {
        let raw = json!({"id": "7", "name": "CS101"});
        let course = Course::from_raw(raw.as_object().unwrap(), CourseRole::Student);
        assert_eq!(course.id, "7");
        assert_eq!(course.name, "CS101");
        assert_eq!(course.short_name, "");
        assert_eq!(course.url, "");
        assert_eq!(course.role, CourseRole::Student);
    }
}
