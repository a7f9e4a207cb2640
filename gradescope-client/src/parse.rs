//! Extraction of records from Gradescope pages.
//!
//! Every function here is pure: markup in, records out. Records use the field
//! names `id`, `name`, `short_name`, `url`, `due_date`, `total_points`,
//! `email` and `role`; fields that can't be found are left out.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::html::{attr, decode_entities, has_class, text};
use crate::{ClientError, CourseGroups, RawRecord, Result};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern")
}

static INPUT: LazyLock<Regex> = LazyLock::new(|| re(r"<input\b([^>]*)>"));
static META: LazyLock<Regex> = LazyLock::new(|| re(r"<meta\b([^>]*)>"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<h[1-6]\b([^>]*)>(.*?)</h[1-6]>"));
static ANCHOR: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<a\b([^>]*)>(.*?)</a>"));
static DIV: LazyLock<Regex> = LazyLock::new(|| re(r"<div\b([^>]*)>"));
static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| re(r"<([a-z][a-z0-9]*)\b([^>]*)>"));
static TABLE: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<table\b([^>]*)>(.*?)</table>"));
static ROW: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<tr\b([^>]*)>(.*?)</tr>"));
static HEADER_CELL: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<th\b([^>]*)>(.*?)</th>"));
static TIME: LazyLock<Regex> = LazyLock::new(|| re(r"<time\b([^>]*)>"));
static BUTTON: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<button\b([^>]*)>(.*?)</button>"));
static OPTION: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<option\b([^>]*)>(.*?)</option>"));
static COURSE_HREF: LazyLock<Regex> = LazyLock::new(|| re(r"^/courses/(\d+)/?$"));
static ASSIGNMENT_HREF: LazyLock<Regex> = LazyLock::new(|| re(r"/courses/\d+/assignments/(\d+)"));
static SCORE: LazyLock<Regex> = LazyLock::new(|| re(r"([\d.]+)\s*/\s*([\d.]+)"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| re(r"[\w.+-]+@[\w-]+(?:\.[\w-]+)+"));

/// CSRF token from the login form, falling back to the `csrf-token` meta tag.
pub(crate) fn authenticity_token(html: &str) -> Option<String> {
    INPUT
        .captures_iter(html)
        .find(|c| attr(&c[1], "name").as_deref() == Some("authenticity_token"))
        .and_then(|c| attr(&c[1], "value"))
        .or_else(|| {
            META.captures_iter(html)
                .find(|c| attr(&c[1], "name").as_deref() == Some("csrf-token"))
                .and_then(|c| attr(&c[1], "content"))
        })
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Instructor,
    Student,
}

fn group_slot(groups: &mut CourseGroups, group: Group) -> &mut Vec<RawRecord> {
    let slot = match group {
        Group::Instructor => &mut groups.instructor,
        Group::Student => &mut groups.student,
    };
    slot.get_or_insert_with(Vec::new)
}

/// Courses on the `/account` page.
///
/// Accounts with both roles get "Instructor Courses" and "Student Courses"
/// headings. Single-role accounts get one "Your Courses" heading; those are
/// instructor accounts when the page offers to create a course.
pub(crate) fn courses(html: &str, base_url: &str) -> CourseGroups {
    let fallback = if html.contains("Create a new course") {
        Group::Instructor
    } else {
        Group::Student
    };

    let headings: Vec<(usize, Group)> = HEADING
        .captures_iter(html)
        .filter(|c| has_class(&c[1], "pageHeading"))
        .map(|c| {
            let heading = text(&c[2]).to_lowercase();
            let group = if heading.contains("instructor") {
                Group::Instructor
            } else if heading.contains("student") {
                Group::Student
            } else {
                fallback
            };
            (c.get(0).map_or(0, |m| m.start()), group)
        })
        .collect();

    let mut groups = CourseGroups::default();
    for &(_, group) in &headings {
        group_slot(&mut groups, group);
    }

    for caps in ANCHOR.captures_iter(html) {
        let attrs = &caps[1];
        if !has_class(attrs, "courseBox") {
            continue;
        }
        let Some(href) = attr(attrs, "href") else {
            continue;
        };
        let Some(id) = COURSE_HREF.captures(&href).map(|c| c[1].to_string()) else {
            continue;
        };

        let start = caps.get(0).map_or(0, |m| m.start());
        let group = headings
            .iter()
            .rev()
            .find(|(pos, _)| *pos < start)
            .map_or(fallback, |&(_, g)| g);

        let inner = &caps[2];
        let mut record = RawRecord::new();
        record.insert("id".into(), Value::String(id.clone()));
        if let Some(name) = element_text(inner, "courseBox--name") {
            record.insert("name".into(), Value::String(name));
        }
        if let Some(short_name) = element_text(inner, "courseBox--shortname") {
            record.insert("short_name".into(), Value::String(short_name));
        }
        record.insert("url".into(), Value::String(format!("{base_url}/courses/{id}")));

        group_slot(&mut groups, group).push(record);
    }

    groups
}

/// Text of the first element carrying `class`, up to its first closing tag.
fn element_text(fragment: &str, class: &str) -> Option<String> {
    let open = OPEN_TAG
        .captures_iter(fragment)
        .find(|c| has_class(&c[2], class))?;
    let rest = &fragment[open.get(0)?.end()..];
    let close = rest.find("</").unwrap_or(rest.len());
    Some(text(&rest[..close])).filter(|t| !t.is_empty())
}

/// Assignments from the student table on `/courses/{id}`.
///
/// `None` when the page has no student table, i.e. the account is staff.
pub(crate) fn student_assignments(
    html: &str,
    course_id: &str,
    base_url: &str,
) -> Option<Vec<RawRecord>> {
    let table = TABLE
        .captures_iter(html)
        .find(|c| attr(&c[1], "id").as_deref() == Some("assignments-student-table"))?;

    let rows = ROW
        .captures_iter(&table[2])
        .filter_map(|row| {
            let inner = &row[2];
            let cell = HEADER_CELL
                .captures_iter(inner)
                .find(|c| has_class(&c[1], "table--primaryLink"))?;

            let mut record = RawRecord::new();
            let cell_markup = &cell[2];

            let id = ASSIGNMENT_HREF
                .captures(cell_markup)
                .map(|c| c[1].to_string())
                .or_else(|| data_assignment_id(cell_markup));
            if let Some(id) = id {
                record.insert(
                    "url".into(),
                    Value::String(format!("{base_url}/courses/{course_id}/assignments/{id}")),
                );
                record.insert("id".into(), Value::String(id));
            }
            record.insert("name".into(), Value::String(text(cell_markup)));

            let due = TIME
                .captures_iter(inner)
                .find(|c| has_class(&c[1], "submissionTimeChart--dueDate"))
                .and_then(|c| attr(&c[1], "datetime"));
            if let Some(due) = due {
                record.insert("due_date".into(), Value::String(due));
            }

            let points = element_text(inner, "submissionStatus--score")
                .and_then(|score| SCORE.captures(&score).and_then(|c| c[2].parse::<f64>().ok()));
            if let Some(points) = points {
                record.insert("total_points".into(), Value::from(points));
            }

            Some(record)
        })
        .collect();

    Some(rows)
}

fn data_assignment_id(fragment: &str) -> Option<String> {
    BUTTON
        .captures_iter(fragment)
        .find_map(|c| attr(&c[1], "data-assignment-id"))
}

/// Assignments from the `AssignmentsTable` component on
/// `/courses/{id}/assignments`, which embeds its rows as JSON props.
pub(crate) fn instructor_assignments(html: &str, base_url: &str) -> Result<Vec<RawRecord>> {
    let props = DIV
        .captures_iter(html)
        .find(|c| attr(&c[1], "data-react-class").as_deref() == Some("AssignmentsTable"))
        .and_then(|c| attr(&c[1], "data-react-props"))
        .ok_or_else(|| ClientError::Parse("no assignment table on course page".to_string()))?;

    let props: Value = serde_json::from_str(&props)
        .map_err(|e| ClientError::Parse(format!("assignment table props: {e}")))?;

    let rows = props
        .get("table_data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    Ok(rows
        .iter()
        .filter(|row| {
            row.get("type")
                .and_then(Value::as_str)
                .is_none_or(|t| t == "assignment")
        })
        .map(|row| instructor_row(row, base_url))
        .collect())
}

fn instructor_row(row: &Value, base_url: &str) -> RawRecord {
    let mut record = RawRecord::new();

    let id = match row.get("id") {
        Some(Value::String(s)) => Some(s.trim_start_matches("assignment_").to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };
    if let Some(id) = id {
        record.insert("id".into(), Value::String(id));
    }
    if let Some(title) = row.get("title").and_then(Value::as_str) {
        record.insert("name".into(), Value::String(decode_entities(title)));
    }
    if let Some(url) = row.get("url").and_then(Value::as_str) {
        record.insert("url".into(), Value::String(format!("{base_url}{url}")));
    }
    if let Some(due) = row.pointer("/submission_window/due_date").filter(|v| !v.is_null()) {
        record.insert("due_date".into(), due.clone());
    }
    if let Some(points) = row.get("total_points").filter(|v| !v.is_null()) {
        record.insert("total_points".into(), points.clone());
    }

    record
}

/// Members of the roster on `/courses/{id}/memberships`.
pub(crate) fn roster(html: &str) -> Vec<RawRecord> {
    ROW.captures_iter(html)
        .filter(|row| has_class(&row[1], "rosterRow"))
        .filter_map(|row| {
            let inner = &row[2];
            let button = BUTTON.captures_iter(inner).find(|c| {
                has_class(&c[1], "js-rosterName") || has_class(&c[1], "rosterCell--primaryLink")
            })?;
            let button_attrs = &button[1];
            let cm: Option<Value> =
                attr(button_attrs, "data-cm").and_then(|s| serde_json::from_str(&s).ok());
            let cm_str = |key: &str| {
                cm.as_ref().and_then(|cm| match cm.get(key)? {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
            };

            let mut record = RawRecord::new();

            let id = attr(button_attrs, "data-id")
                .or_else(|| cm_str("id"))
                .or_else(|| cm_str("user_id"));
            if let Some(id) = id {
                record.insert("id".into(), Value::String(id));
            }

            let name = cm_str("full_name").unwrap_or_else(|| text(&button[2]));
            record.insert("name".into(), Value::String(name));

            let email = attr(button_attrs, "data-email")
                .or_else(|| cm_str("email"))
                .or_else(|| EMAIL.find(&text(inner)).map(|m| m.as_str().to_string()));
            if let Some(email) = email {
                record.insert("email".into(), Value::String(email));
            }

            let role = OPTION
                .captures_iter(inner)
                .find(|c| c[1].contains("selected"))
                .map(|c| text(&c[2]));
            if let Some(role) = role {
                record.insert("role".into(), Value::String(role));
            }

            Some(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.gradescope.com";

    const LOGIN_PAGE: &str = r#"
        <html><head><meta name="csrf-token" content="meta-token" /></head>
        <body><form action="/login" method="post">
          <input name="utf8" type="hidden" value="&#x2713;" />
          <input type="hidden" name="authenticity_token" value="form+token==" />
        </form></body></html>"#;

    const ACCOUNT_BOTH: &str = r#"
        <h1 class="pageHeading">Instructor Courses</h1>
        <div class="courseList">
          <div class="courseList--term pageSubheading">Spring 2024</div>
          <a class="courseBox" href="/courses/111">
            <h3 class="courseBox--shortname">CS 101</h3>
            <div class="courseBox--name">Intro to CS</div>
          </a>
        </div>
        <h2 class="pageHeading">Student Courses</h2>
        <div class="courseList">
          <a class="courseBox" href="/courses/222">
            <h3 class="courseBox--shortname">MATH 2</h3>
            <div class="courseBox--name">Calculus &amp; Analysis</div>
          </a>
          <a class="courseBox" href="/courses/333">
            <h3 class="courseBox--shortname">PHYS 1</h3>
          </a>
        </div>"#;

    const STUDENT_COURSE: &str = r#"
        <table id="assignments-student-table" class="table">
          <thead><tr><th class="table--header">Name</th><th>Status</th></tr></thead>
          <tbody>
            <tr role="row">
              <th class="table--primaryLink" scope="row"><a href="/courses/222/assignments/9001/submissions/5">HW 1</a></th>
              <td class="submissionStatus"><div class="submissionStatus--score">8.0 / 10.0</div></td>
              <td><div class="submissionTimeChart">
                <time class="submissionTimeChart--releaseDate" datetime="2024-01-01 00:00:00 -0800">Jan 01</time>
                <time class="submissionTimeChart--dueDate" datetime="2024-01-15 23:59:00 -0800">Jan 15</time>
              </div></td>
            </tr>
            <tr role="row">
              <th class="table--primaryLink" scope="row"><button class="js-submitAssignment" data-assignment-id="9002" type="button">HW 2</button></th>
              <td class="submissionStatus">No Submission</td>
              <td></td>
            </tr>
          </tbody>
        </table>"#;

    #[test]
    fn test_authenticity_token_prefers_form_input() {
        assert_eq!(authenticity_token(LOGIN_PAGE).as_deref(), Some("form+token=="));
    }

    #[test]
    fn test_authenticity_token_meta_fallback() {
        let html = r#"<meta name="csrf-token" content="meta-token" />"#;
        assert_eq!(authenticity_token(html).as_deref(), Some("meta-token"));
        assert_eq!(authenticity_token("<html></html>"), None);
    }

    #[test]
    fn test_courses_split_by_heading() {
        let groups = courses(ACCOUNT_BOTH, BASE);
        let instructor = groups.instructor.unwrap();
        let student = groups.student.unwrap();

        assert_eq!(instructor.len(), 1);
        assert_eq!(instructor[0]["id"], "111");
        assert_eq!(instructor[0]["short_name"], "CS 101");
        assert_eq!(instructor[0]["name"], "Intro to CS");
        assert_eq!(instructor[0]["url"], "https://www.gradescope.com/courses/111");

        assert_eq!(student.len(), 2);
        assert_eq!(student[0]["name"], "Calculus & Analysis");
        assert_eq!(student[1]["id"], "333");
        assert!(!student[1].contains_key("name"));
    }

    #[test]
    fn test_single_role_account_uses_fallback() {
        let html = r#"
            <h1 class="pageHeading">Your Courses</h1>
            <a class="courseBox" href="/courses/5"><h3 class="courseBox--shortname">A</h3></a>"#;
        let groups = courses(html, BASE);
        assert_eq!(groups.instructor, None);
        assert_eq!(groups.student.unwrap().len(), 1);

        let staff = format!("{html}<button>Create a new course</button>");
        let groups = courses(&staff, BASE);
        assert_eq!(groups.student, None);
        assert_eq!(groups.instructor.unwrap().len(), 1);
    }

    #[test]
    fn test_student_assignments() {
        let rows = student_assignments(STUDENT_COURSE, "222", BASE).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0]["id"], "9001");
        assert_eq!(rows[0]["name"], "HW 1");
        assert_eq!(rows[0]["due_date"], "2024-01-15 23:59:00 -0800");
        assert_eq!(rows[0]["total_points"], 10.0);
        assert_eq!(
            rows[0]["url"],
            "https://www.gradescope.com/courses/222/assignments/9001"
        );

        assert_eq!(rows[1]["id"], "9002");
        assert_eq!(rows[1]["name"], "HW 2");
        assert!(!rows[1].contains_key("due_date"));
        assert!(!rows[1].contains_key("total_points"));
    }

    #[test]
    fn test_no_student_table() {
        assert!(student_assignments("<div>Dashboard</div>", "1", BASE).is_none());
    }

    #[test]
    fn test_instructor_assignments_from_props() {
        let html = r#"<div data-react-class="AssignmentsTable" data-react-props="{&quot;table_data&quot;:[{&quot;id&quot;:&quot;assignment_42&quot;,&quot;type&quot;:&quot;assignment&quot;,&quot;title&quot;:&quot;Midterm&quot;,&quot;url&quot;:&quot;/courses/1/assignments/42&quot;,&quot;total_points&quot;:&quot;50.0&quot;,&quot;submission_window&quot;:{&quot;due_date&quot;:&quot;2024-03-01T17:00:00-08:00&quot;}},{&quot;id&quot;:&quot;group_1&quot;,&quot;type&quot;:&quot;assignment_group&quot;}]}"></div>"#;
        let rows = instructor_assignments(html, BASE).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "42");
        assert_eq!(rows[0]["name"], "Midterm");
        assert_eq!(rows[0]["url"], "https://www.gradescope.com/courses/1/assignments/42");
        assert_eq!(rows[0]["total_points"], "50.0");
        assert_eq!(rows[0]["due_date"], "2024-03-01T17:00:00-08:00");
    }

    #[test]
    fn test_instructor_assignments_missing_table_is_parse_error() {
        let err = instructor_assignments("<html></html>", BASE).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Parse);
    }

    #[test]
    fn test_roster() {
        let html = r#"
            <table class="js-rosterTable">
              <tr><th>Name</th><th>Email</th><th>Role</th></tr>
              <tr class="rosterRow">
                <td><button class="js-rosterName rosterCell--primaryLink" data-id="77"
                    data-email="jane@uni.edu"
                    data-cm="{&quot;full_name&quot;:&quot;Jane Doe&quot;}">Jane D.</button></td>
                <td>jane@uni.edu</td>
                <td><select><option value="0" selected="selected">Student</option><option value="1">Instructor</option></select></td>
              </tr>
              <tr class="rosterRow">
                <td><button class="rosterCell--primaryLink">Sam Roe</button></td>
                <td>sam@uni.edu</td>
                <td></td>
              </tr>
            </table>"#;

        let users = roster(html);
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["id"], "77");
        assert_eq!(users[0]["name"], "Jane Doe");
        assert_eq!(users[0]["email"], "jane@uni.edu");
        assert_eq!(users[0]["role"], "Student");

        assert_eq!(users[1]["name"], "Sam Roe");
        assert_eq!(users[1]["email"], "sam@uni.edu");
        assert!(!users[1].contains_key("id"));
        assert!(!users[1].contains_key("role"));
    }
}
