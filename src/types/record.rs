use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One PR, release, or tagged-repo entry as returned by the backend.
///
/// Records are opaque field maps: any field may be missing or `null`, and the
/// original field order is kept so that a persisted record reads back
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Textual form of a scalar field.
    ///
    /// Strings are borrowed; numbers and booleans are rendered. `null`,
    /// arrays, objects, and missing fields yield `None`.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.0.get(field)? {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// The field parsed as a calendar instant, if it holds a valid date.
    pub fn instant(&self, field: &str) -> Option<DateTime<Utc>> {
        self.text(field).and_then(|s| parse_instant(&s))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn text_renders_scalars() {
        let r = Record::new()
            .with("title", "Fix bug")
            .with("number", 42)
            .with("draft", false)
            .with("body", Value::Null);
        assert_eq!(r.text("title").as_deref(), Some("Fix bug"));
        assert_eq!(r.text("number").as_deref(), Some("42"));
        assert_eq!(r.text("draft").as_deref(), Some("false"));
        assert!(r.text("body").is_none());
        assert!(r.text("missing").is_none());
    }

    #[test]
    fn instant_accepts_rfc3339_and_plain_dates() {
        let r = Record::new()
            .with("created_at", "2024-03-05T10:30:00Z")
            .with("updated_at", "2024-03-06")
            .with("published_at", "yesterday");
        assert_eq!(
            r.instant("created_at"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap())
        );
        assert_eq!(
            r.instant("updated_at"),
            Some(Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap())
        );
        assert!(r.instant("published_at").is_none());
    }

    #[test]
    fn deserializes_from_object_and_keeps_field_order() {
        let r: Record =
            serde_json::from_value(json!({"repo_name": "igloo-api", "tag_name": "v1.0.0"}))
                .unwrap();
        let names: Vec<&str> = r.fields().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["repo_name", "tag_name"]);
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"{"repo_name":"igloo-api","tag_name":"v1.0.0"}"#);
    }
}
