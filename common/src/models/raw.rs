//! Loosely-typed records as returned by the Gradescope client.
//!
//! Field reads never fail: missing or mistyped fields degrade to an empty
//! string, or to `None` for optional fields.

use serde_json::{Map, Value};

/// A raw record keyed by field name.
pub type RawRecord = Map<String, Value>;

/// Lenient field accessors for [`RawRecord`].
pub trait RawRecordExt {
    /// String field, or `""` when missing.
    fn str_or_empty(&self, key: &str) -> String;

    /// Optional string field.
    fn opt_str(&self, key: &str) -> Option<String>;

    /// Optional numeric field. Numeric strings are accepted.
    fn opt_f64(&self, key: &str) -> Option<f64>;
}

impl RawRecordExt for RawRecord {
    fn str_or_empty(&self, key: &str) -> String {
        self.opt_str(key).unwrap_or_default()
    }

    fn opt_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn opt_f64(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
