//! Client for the Gradescope web portal.
//!
//! Gradescope has no public API; everything here works by logging in through
//! the regular web form and reading the HTML pages a browser would see.
//!
//! ```no_run
//! # async fn run() -> Result<(), gradescope_client::ClientError> {
//! let connection = gradescope_client::Connection::new("https://www.gradescope.com")?;
//! let account = connection.login("me@uni.edu", "secret").await?;
//! let _courses = account.get_courses().await?;
//! # Ok(())
//! # }
//! ```

mod account;
mod connection;
mod error;
mod html;
mod parse;

pub use account::{Account, CourseGroups};
pub use connection::Connection;
pub use error::{ClientError, ErrorKind};

/// A loosely-typed record scraped from a page.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
