use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::{parse, ClientError, RawRecord, Result};

/// Courses on the account page, split by the heading they appear under.
///
/// A group is `None` when the page has no section for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseGroups {
    pub instructor: Option<Vec<RawRecord>>,
    pub student: Option<Vec<RawRecord>>,
}

/// A logged-in Gradescope session.
#[derive(Clone)]
pub struct Account {
    http: Client,
    base_url: String,
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Account {
    pub(crate) fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Lists every course on the account page.
    pub async fn get_courses(&self) -> Result<CourseGroups> {
        let html = self.fetch_page("/account").await?;
        Ok(parse::courses(&html, &self.base_url))
    }

    /// Lists the assignments of a course.
    ///
    /// Students see a table on the course page; instructors get the
    /// assignment table from `/courses/{id}/assignments` instead.
    pub async fn get_assignments(&self, course_id: &str) -> Result<Vec<RawRecord>> {
        check_course_id(course_id)?;

        let html = self.fetch_page(&format!("/courses/{course_id}")).await?;
        if let Some(rows) = parse::student_assignments(&html, course_id, &self.base_url) {
            return Ok(rows);
        }

        debug!(course_id, "no student table, reading instructor view");
        let html = self
            .fetch_page(&format!("/courses/{course_id}/assignments"))
            .await?;
        parse::instructor_assignments(&html, &self.base_url)
    }

    /// Lists the roster of a course. Requires staff access.
    pub async fn get_course_users(&self, course_id: &str) -> Result<Vec<RawRecord>> {
        check_course_id(course_id)?;

        let html = self
            .fetch_page(&format!("/courses/{course_id}/memberships"))
            .await?;
        Ok(parse::roster(&html))
    }

    async fn fetch_page(&self, path: &str) -> Result<String> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;

        match resp.status() {
            StatusCode::NOT_FOUND => return Err(ClientError::NotFound(path.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ClientError::Auth(format!("access denied to {path}")))
            }
            _ => {}
        }

        let resp = resp.error_for_status()?;
        // 会话失效时 Gradescope 会重定向回登录页
        if resp.url().path() == "/login" {
            return Err(ClientError::Auth("session expired, login again".to_string()));
        }

        Ok(resp.text().await?)
    }
}

fn check_course_id(course_id: &str) -> Result<()> {
    if course_id.is_empty() || !course_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClientError::NotFound(format!("course {course_id}")));
    }
    Ok(())
}
