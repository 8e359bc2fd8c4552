//! The shipped dashboards and the controllers that drive them.

pub mod dashboard;
pub mod tab_panel;

pub use dashboard::Dashboard;
pub use tab_panel::TabPanel;

use crate::backend::SourceQuery;
use crate::config::Defaults;
use crate::render::Column;
use crate::types::{Dimension, RefKind};
use crate::view::{FetchPlan, Strategy, ViewConfig};

/// Which backend endpoint feeds a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    UserReleases,
    AllPrs,
    ReposByTag,
}

/// Everything that distinguishes one dashboard from another.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Namespace for persisted state.
    pub id: String,
    pub source: SourceKind,
    pub view: ViewConfig,
    /// Persist the whole fetched collection, not just the visible page.
    pub persist_raw: bool,
    /// Reference list offered as suggestions for the search box.
    pub suggest: RefKind,
    /// Filter inputs with their own reference-list typeahead.
    pub filter_suggest: Vec<(Dimension, RefKind)>,
    /// `per_page` sent to bulk endpoints that accept one.
    pub bulk_per_page: u32,
    /// Plural noun used in the summary line.
    pub noun: &'static str,
    pub columns: Vec<Column>,
}

impl DashboardConfig {
    /// Every release by one user, filtered, sorted and paged locally.
    pub fn releases(defaults: &Defaults, persist_raw: bool) -> Self {
        let mut view = ViewConfig::new(Strategy::Bulk, defaults.page_size);
        view.sortable = ["name", "repo_name", "author", "created_at"]
            .map(str::to_owned)
            .to_vec();
        Self {
            id: "releases".to_owned(),
            source: SourceKind::UserReleases,
            view,
            persist_raw,
            suggest: RefKind::Users,
            // Repo and author suggestions come from the fetched releases.
            filter_suggest: Vec::new(),
            bulk_per_page: defaults.releases_per_page,
            noun: "releases",
            columns: vec![
                Column::text("name", "Release", 0.30),
                Column::text("repo_name", "Repository", 0.25),
                Column::text("author", "Author", 0.15),
                Column::date("created_at", "Created", 0.12),
                Column::text("html_url", "URL", 0.18),
            ],
        }
    }

    /// All PRs, filtered and paged by the server.
    pub fn prs(defaults: &Defaults) -> Self {
        let mut view = ViewConfig::new(Strategy::Paged, defaults.page_size);
        view.window = 10;
        // What `/prs/all` can filter on.
        view.dimensions = vec![
            Dimension::Username,
            Dimension::Repo,
            Dimension::DateFrom,
            Dimension::DateTo,
        ];
        Self {
            id: "prs".to_owned(),
            source: SourceKind::AllPrs,
            view,
            // Paged views only ever hold one page.
            persist_raw: false,
            suggest: RefKind::Users,
            filter_suggest: vec![(Dimension::Repo, RefKind::Repos)],
            bulk_per_page: defaults.page_size,
            noun: "pull requests",
            columns: vec![
                Column::text("number", "#", 0.06),
                Column::text("title", "Title", 0.40),
                Column::text("repo_name", "Repository", 0.18),
                Column::text("author", "Author", 0.12),
                Column::text("state", "State", 0.08),
                Column::date("created_at", "Created", 0.16),
            ],
        }
    }

    /// Repositories carrying one release tag.
    pub fn release_tags(defaults: &Defaults, persist_raw: bool) -> Self {
        let mut view = ViewConfig::new(Strategy::Bulk, defaults.page_size);
        view.sortable = ["repo_name", "tag_name"].map(str::to_owned).to_vec();
        view.subject = Dimension::Tag;
        Self {
            id: "tags".to_owned(),
            source: SourceKind::ReposByTag,
            view,
            persist_raw,
            suggest: RefKind::Tags,
            filter_suggest: Vec::new(),
            bulk_per_page: defaults.page_size,
            noun: "repositories",
            columns: vec![
                Column::text("repo_name", "Repository", 0.60),
                Column::text("tag_name", "Tag", 0.40),
            ],
        }
    }

    /// The backend query for `plan`.
    ///
    /// Bulk sources receive only the subject; every other criterion is
    /// applied locally. The paged source receives all of them, which is why
    /// its view accepts only the dimensions the endpoint filters on.
    pub fn query_for(&self, plan: &FetchPlan) -> SourceQuery {
        let get = |d: Dimension| plan.criteria.get(d).unwrap_or_default().to_owned();
        match self.source {
            SourceKind::UserReleases => SourceQuery::UserReleases {
                username: get(Dimension::Username),
                repo: String::new(),
                per_page: self.bulk_per_page,
            },
            SourceKind::AllPrs => SourceQuery::AllPrs {
                username: get(Dimension::Username),
                repo: get(Dimension::Repo),
                from_date: get(Dimension::DateFrom),
                to_date: get(Dimension::DateTo),
                page: plan.page,
                per_page: plan.per_page,
            },
            SourceKind::ReposByTag => SourceQuery::ReposByTag {
                tag: get(Dimension::Tag),
            },
        }
    }
}
