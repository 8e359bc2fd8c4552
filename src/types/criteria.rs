use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::parse_instant;

// ---------------------------------------------------------------------------
// Filter dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Username,
    Repo,
    Tag,
    Author,
    State,
    DateFrom,
    DateTo,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Username,
        Dimension::Repo,
        Dimension::Tag,
        Dimension::Author,
        Dimension::State,
        Dimension::DateFrom,
        Dimension::DateTo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Repo => "repo",
            Self::Tag => "tag",
            Self::Author => "author",
            Self::State => "state",
            Self::DateFrom => "date_from",
            Self::DateTo => "date_to",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::DateFrom | Self::DateTo)
    }

    /// Record fields a string dimension matches against (any of them).
    ///
    /// `Username` names the subject of a fetch and has no local binding.
    pub(crate) fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Username | Self::DateFrom | Self::DateTo => &[],
            Self::Repo => &["repo_name"],
            Self::Tag => &["tag_name", "name"],
            Self::Author => &["author"],
            Self::State => &["state"],
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown filter dimension {s:?}"))
    }
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// The active filter constraints. Unset dimensions are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria(BTreeMap<Dimension, String>);

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        self.0.get(&dimension).map(String::as_str)
    }

    /// Set one dimension, returning whether the criteria changed.
    ///
    /// The value is trimmed. Blank values and unparseable dates unset the
    /// dimension instead of being stored.
    pub fn set(&mut self, dimension: Dimension, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || (dimension.is_date() && parse_instant(value).is_none()) {
            return self.clear(dimension);
        }
        if self.get(dimension) == Some(value) {
            return false;
        }
        self.0.insert(dimension, value.to_owned());
        true
    }

    pub fn clear(&mut self, dimension: Dimension) -> bool {
        self.0.remove(&dimension).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &str)> {
        self.0.iter().map(|(d, v)| (*d, v.as_str()))
    }

    /// Parsed bound for a date dimension.
    pub fn date_bound(&self, dimension: Dimension) -> Option<DateTime<Utc>> {
        debug_assert!(dimension.is_date());
        self.get(dimension).and_then(parse_instant)
    }

    /// A copy with one dimension removed.
    pub fn without(&self, dimension: Dimension) -> Self {
        let mut copy = self.clone();
        copy.clear(dimension);
        copy
    }
}
