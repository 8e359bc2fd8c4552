use serde::Deserialize;

use crate::types::{PrCategory, Record};

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PeopleResponse {
    pub people: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ReposResponse {
    pub repos: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ReposByTagResponse {
    pub repos: Vec<Record>,
}

/// Shared shape of `/prs/*` and `/user-releases`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ItemsResponse {
    pub items: Vec<Record>,
    pub total_count: Option<u64>,
    pub page: Option<u32>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// One record-fetching call against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceQuery {
    /// `GET /user-releases`: every release by `username`, in one response.
    UserReleases {
        username: String,
        repo: String,
        per_page: u32,
    },
    /// `GET /prs/all`: one server-filtered page.
    AllPrs {
        username: String,
        repo: String,
        from_date: String,
        to_date: String,
        page: u32,
        per_page: u32,
    },
    /// `GET /repos-by-tag`.
    ReposByTag { tag: String },
    /// `GET /prs/{category}`: one page of a category tab.
    CategoryPrs {
        category: PrCategory,
        username: String,
        page: u32,
        per_page: u32,
    },
}

impl SourceQuery {
    pub fn path(&self) -> String {
        match self {
            Self::UserReleases { .. } => "/user-releases".to_owned(),
            Self::AllPrs { .. } => "/prs/all".to_owned(),
            Self::ReposByTag { .. } => "/repos-by-tag".to_owned(),
            Self::CategoryPrs { category, .. } => format!("/prs/{category}"),
        }
    }

    /// Query parameters, with empty values left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let params = match self {
            Self::UserReleases {
                username,
                repo,
                per_page,
            } => vec![
                ("username", username.clone()),
                ("repo", repo.clone()),
                ("per_page", per_page.to_string()),
            ],
            Self::AllPrs {
                username,
                repo,
                from_date,
                to_date,
                page,
                per_page,
            } => vec![
                ("username", username.clone()),
                ("repo", repo.clone()),
                ("from_date", from_date.clone()),
                ("to_date", to_date.clone()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
            Self::ReposByTag { tag } => vec![("tag", tag.clone())],
            Self::CategoryPrs {
                username,
                page,
                per_page,
                ..
            } => vec![
                ("username", username.clone()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        };
        params
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .collect()
    }

    /// The page this query asks for, if the endpoint is paged.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::AllPrs { page, .. } | Self::CategoryPrs { page, .. } => Some(*page),
            Self::UserReleases { .. } | Self::ReposByTag { .. } => None,
        }
    }
}

/// Records returned by one [`SourceQuery`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedRecords {
    pub records: Vec<Record>,
    /// Missing from the body decodes as 0 for paged endpoints.
    pub total_count: Option<u64>,
    /// The page the server reports, else the requested one.
    pub page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_are_omitted() {
        let q = SourceQuery::AllPrs {
            username: "alice".into(),
            repo: "  ".into(),
            from_date: String::new(),
            to_date: "2024-02-01".into(),
            page: 2,
            per_page: 10,
        };
        let keys: Vec<&str> = q.params().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["username", "to_date", "page", "per_page"]);
    }

    #[test]
    fn category_path_uses_kebab_case() {
        let q = SourceQuery::CategoryPrs {
            category: PrCategory::ReviewRequested,
            username: String::new(),
            page: 1,
            per_page: 50,
        };
        assert_eq!(q.path(), "/prs/review-requested");
        assert_eq!(q.page(), Some(1));
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let body: ItemsResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
        assert!(body.total_count.is_none());
        let body: PeopleResponse = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(body.people.is_empty());
    }
}
