//! Small text helpers for scraped markup.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex"));
static SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("space regex"));

/// Decodes the handful of entities Gradescope emits in text and attributes.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Strips tags, decodes entities and collapses whitespace.
pub(crate) fn text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&stripped);
    SPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Value of attribute `name` inside an opening tag's attribute string.
pub(crate) fn attr(attrs: &str, name: &str) -> Option<String> {
    let needle = format!("{name}=\"");
    let start = attrs
        .match_indices(&needle)
        .find(|(i, _)| *i == 0 || attrs.as_bytes()[i - 1].is_ascii_whitespace())
        .map(|(i, _)| i + needle.len())?;
    let end = attrs[start..].find('"')? + start;
    Some(decode_entities(&attrs[start..end]))
}

/// Whether the `class` attribute contains `class` as a whole word.
pub(crate) fn has_class(attrs: &str, class: &str) -> bool {
    attr(attrs, "class").is_some_and(|c| c.split_whitespace().any(|c| c == class))
}
