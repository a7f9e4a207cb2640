//! Course roster model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::raw::{RawRecord, RawRecordExt};

/// A member of a course roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CourseUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Roster role as Gradescope names it, e.g. `Student` or `TA`.
    pub role: String,
}

impl CourseUser {
    pub fn from_raw(raw: &RawRecord) -> Self {
        Self {
            id: raw.str_or_empty("id"),
            name: raw.str_or_empty("name"),
            email: raw.str_or_empty("email"),
            role: raw.str_or_empty("role"),
        }
    }
}
