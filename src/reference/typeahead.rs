use indexmap::IndexSet;

use crate::filter::filter_names;
use crate::types::{Record, RefKind};

pub const DEFAULT_LIMIT: usize = 10;

/// Search-box state with suggestions drawn from one reference list.
///
/// The input text and the resolved value are kept apart: only a selected
/// (or submitted) value resolves, and typing again clears it.
#[derive(Debug, Clone)]
pub struct Typeahead {
    kind: RefKind,
    input: String,
    selected: Option<String>,
    limit: usize,
}

impl Typeahead {
    pub fn new(kind: RefKind) -> Self {
        Self {
            kind,
            input: String::new(),
            selected: None,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Restore a previous search text without resolving it.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn kind(&self) -> RefKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn type_text(&mut self, text: &str) {
        self.input = text.to_owned();
        self.selected = None;
    }

    pub fn select(&mut self, value: &str) {
        self.input = value.to_owned();
        self.selected = Some(value.to_owned());
    }

    /// The value the user committed to, if any.
    pub fn resolved(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Commit the raw input as-is (Enter without picking a suggestion).
    pub fn submit(&mut self) -> &str {
        self.selected = Some(self.input.trim().to_owned());
        self.selected.as_deref().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.selected = None;
    }

    /// Up to `limit` entries of `values` matching the input, in source order.
    pub fn suggestions<'a>(&self, values: &'a [String]) -> Vec<&'a str> {
        filter_names(values, &self.input).take(self.limit).collect()
    }
}

/// Distinct non-empty values of `field` across `records`, first-seen order.
pub fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.text(field))
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.into_owned())
        .collect::<IndexSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<String> {
        (1..=30).map(|i| format!("v1.{i}.0")).collect()
    }

    #[test]
    fn suggestions_are_capped_and_ordered() {
        let mut ta = Typeahead::new(RefKind::Tags);
        let values = tags();
        assert_eq!(ta.suggestions(&values).len(), 10);
        assert_eq!(ta.suggestions(&values)[0], "v1.1.0");

        ta.type_text("V1.2");
        assert_eq!(
            ta.suggestions(&values),
            vec!["v1.2.0", "v1.20.0", "v1.21.0", "v1.22.0", "v1.23.0", "v1.24.0",
                 "v1.25.0", "v1.26.0", "v1.27.0", "v1.28.0"]
        );
    }

    #[test]
    fn limit_caps_suggestions() {
        let ta = Typeahead::new(RefKind::Tags).with_input("v1.1").with_limit(3);
        assert_eq!(ta.kind(), RefKind::Tags);
        assert_eq!(ta.suggestions(&tags()), vec!["v1.1.0", "v1.10.0", "v1.11.0"]);
        assert_eq!(Typeahead::new(RefKind::Tags).with_limit(0).suggestions(&tags()).len(), 1);
    }

    #[test]
    fn typing_clears_selection() {
        let mut ta = Typeahead::new(RefKind::Users);
        ta.select("alice");
        assert_eq!(ta.input(), "alice");
        assert_eq!(ta.resolved(), Some("alice"));
        ta.type_text("alic");
        assert_eq!(ta.resolved(), None);
        assert_eq!(ta.submit(), "alic");
        assert_eq!(ta.resolved(), Some("alic"));
    }

    #[test]
    fn distinct_values_skip_blanks_and_dupes() {
        let records = vec![
            Record::new().with("repo_name", "igloo-web"),
            Record::new().with("repo_name", "igloo-api"),
            Record::new().with("repo_name", "igloo-web"),
            Record::new().with("repo_name", " "),
            Record::new(),
        ];
        assert_eq!(
            distinct_values(&records, "repo_name"),
            vec!["igloo-web".to_owned(), "igloo-api".to_owned()]
        );
    }
}
