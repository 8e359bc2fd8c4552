use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Low-churn lookup lists used for filter suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Users,
    Repos,
    Tags,
}

impl RefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Repos => "repos",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "users" | "people" => Ok(Self::Users),
            "repos" => Ok(Self::Repos),
            "tags" => Ok(Self::Tags),
            _ => Err(format!("unknown reference list {s:?} (expected users, repos, or tags)")),
        }
    }
}

/// Per-user PR categories served by `/prs/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrCategory {
    Created,
    Assigned,
    ReviewRequested,
    Reviewed,
}

impl PrCategory {
    pub const ALL: [PrCategory; 4] = [
        PrCategory::Created,
        PrCategory::Assigned,
        PrCategory::ReviewRequested,
        PrCategory::Reviewed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::ReviewRequested => "review-requested",
            Self::Reviewed => "reviewed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Assigned => "Assigned",
            Self::ReviewRequested => "Review Requested",
            Self::Reviewed => "Reviewed",
        }
    }
}

impl fmt::Display for PrCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown PR category {s:?}"))
    }
}
