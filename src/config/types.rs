use std::path::PathBuf;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub defaults: Defaults,
    pub state: StateConfig,
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_owned(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Rows per page on the releases, PRs and tags dashboards.
    pub page_size: u32,
    /// `per_page` sent to `/user-releases`; large enough to fetch every release.
    pub releases_per_page: u32,
    /// Page size of the "load more" category tabs.
    pub category_per_page: u32,
    /// `"relative"` or a chrono format string.
    pub date_format: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: 10,
            releases_per_page: 2000,
            category_per_page: 50,
            date_format: "%Y-%m-%d".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted view state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// State file location; `None` uses the XDG state directory.
    pub path: Option<PathBuf>,
    /// Persist whole fetched collections so bulk dashboards restore without
    /// a network call.
    pub persist_raw: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: None,
            persist_raw: true,
        }
    }
}
