//! Data models exposed by the API.

pub mod assignment;
pub mod auth;
pub mod course;
pub mod raw;
pub mod user;

// Re-export commonly used types
pub use assignment::Assignment;
pub use auth::LoginRequest;
pub use course::{Course, CourseRole};
pub use raw::{RawRecord, RawRecordExt};
pub use user::CourseUser;
