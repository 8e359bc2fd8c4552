//! The query-view engine.
//!
//! A [`QueryView`] owns one dashboard's criteria, sort, and page, and derives
//! the displayed page from the raw collection its result source delivered.
//! It is purely synchronous: operations that need the network return a
//! [`FetchPlan`], and the caller reports the outcome back through
//! `apply_*` with the plan's attempt id. Only the most recently initiated
//! attempt is ever applied.

mod pagination;
mod sort;

pub use pagination::{PageWindow, clamp_page, page_window, slice_bounds, total_pages};

use crate::filter;
use crate::types::{Criteria, Dimension, Record, SortSpec, ViewSnapshot};

/// How the raw collection is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One fetch of the whole candidate set; filter, sort, and page locally.
    Bulk,
    /// The server filters and pages, returning one page plus a total count.
    Paged,
}

/// Per-dashboard engine configuration.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub strategy: Strategy,
    pub page_size: u32,
    /// Maximum number of page links in the pagination window.
    pub window: u32,
    /// Fields the user may sort by. Anything else is ignored.
    pub sortable: Vec<String>,
    /// Fields compared as instants when sorting.
    pub date_fields: Vec<String>,
    /// The dimension passed to the result source as the fetch subject.
    /// Changing it always requires a refetch.
    pub subject: Dimension,
    /// Dimensions this view can evaluate. Setting any other is rejected.
    pub dimensions: Vec<Dimension>,
}

impl ViewConfig {
    pub fn new(strategy: Strategy, page_size: u32) -> Self {
        Self {
            strategy,
            page_size: page_size.max(1),
            window: 7,
            sortable: Vec::new(),
            date_fields: ["created_at", "updated_at", "published_at"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            subject: Dimension::Username,
            dimensions: Dimension::ALL.to_vec(),
        }
    }
}

/// A fetch the caller must perform on the engine's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub attempt: u64,
    pub criteria: Criteria,
    pub page: u32,
    pub per_page: u32,
}

/// One server page as delivered by a paged source.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    pub records: Vec<Record>,
    pub total_count: u64,
    /// Page the server says it returned; falls back to the requested page.
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    attempt: u64,
    page: u32,
}

pub struct QueryView {
    config: ViewConfig,
    criteria: Criteria,
    sort: Option<SortSpec>,
    page: u32,
    /// Bulk: the whole fetched set. Paged: the current server page.
    raw: Vec<Record>,
    /// Indices into `raw` after filtering and sorting.
    derived: Vec<usize>,
    displayed: Vec<Record>,
    total_count: u64,
    latest_attempt: u64,
    in_flight: Option<InFlight>,
    dirty: bool,
    loaded: bool,
}

impl QueryView {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            criteria: Criteria::default(),
            sort: None,
            page: 1,
            raw: Vec::new(),
            derived: Vec::new(),
            displayed: Vec::new(),
            total_count: 0,
            latest_attempt: 0,
            in_flight: None,
            dirty: false,
            loaded: false,
        }
    }

    /// Rebuild a view from a persisted snapshot without touching the network.
    pub fn from_snapshot(config: ViewConfig, snapshot: ViewSnapshot) -> Self {
        let mut view = Self::new(config);
        view.criteria = snapshot.criteria;
        for dimension in Dimension::ALL {
            if !view.accepts(dimension) {
                view.criteria.clear(dimension);
            }
        }
        view.sort = snapshot
            .sort
            .filter(|s| view.config.sortable.contains(&s.field));

        match (view.config.strategy, snapshot.raw, snapshot.displayed) {
            (Strategy::Bulk, Some(raw), _) => {
                view.raw = raw;
                view.loaded = true;
                view.rederive();
                view.page = clamp_page(snapshot.page, view.total_pages());
                view.reslice();
            }
            (Strategy::Paged, _, Some(displayed)) => {
                view.total_count = snapshot
                    .total_count
                    .unwrap_or(displayed.len() as u64);
                view.raw = displayed;
                view.loaded = true;
                view.rederive();
                view.page = clamp_page(snapshot.page, view.total_pages());
            }
            (Strategy::Bulk, None, Some(displayed)) => {
                // Only the visible slice survived; it stays on screen until
                // the next search.
                view.total_count = snapshot
                    .total_count
                    .unwrap_or(displayed.len() as u64);
                view.displayed = displayed;
                view.page = clamp_page(snapshot.page, view.total_pages());
                view.dirty = true;
            }
            (_, _, None) => {
                view.page = 1;
            }
        }
        view
    }

    /// Capture the current state. `include_raw` only matters in bulk mode.
    pub fn snapshot(&self, search: &str, include_raw: bool) -> ViewSnapshot {
        let raw = (include_raw && self.loaded && self.config.strategy == Strategy::Bulk)
            .then(|| self.raw.clone());
        ViewSnapshot {
            search: search.to_owned(),
            criteria: self.criteria.clone(),
            sort: self.sort.clone(),
            page: self.page,
            total_count: Some(self.total_count),
            raw,
            displayed: Some(self.displayed.clone()),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.config.page_size
    }

    /// Bulk: size of the derived collection. Paged: the server's total.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.config.page_size)
    }

    pub fn window(&self) -> PageWindow {
        page_window(self.page, self.total_pages(), self.config.window)
    }

    pub fn displayed(&self) -> &[Record] {
        &self.displayed
    }

    pub fn raw(&self) -> &[Record] {
        &self.raw
    }

    /// Criteria changed since the last fetch and a refetch is due.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether any fetch has completed (or a collection was restored).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn accepts(&self, dimension: Dimension) -> bool {
        self.config.dimensions.contains(&dimension)
    }

    /// A bulk view restored without its raw collection: the saved slice is
    /// all there is until the next search.
    pub fn is_saved_slice(&self) -> bool {
        self.config.strategy == Strategy::Bulk && !self.loaded && !self.displayed.is_empty()
    }

    /// e.g. `"page 2 of 3 (25 releases)"`.
    pub fn summary(&self, noun: &str) -> String {
        format!(
            "page {} of {} ({} {noun})",
            self.page,
            self.total_pages(),
            self.total_count
        )
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    /// Update one criterion. Returns whether anything changed.
    ///
    /// Bulk mode re-derives immediately (back to page 1) unless the subject
    /// changed, which only marks the view dirty. Paged mode always marks it
    /// dirty pending [`QueryView::refetch`]. Dimensions outside
    /// [`ViewConfig::dimensions`] are rejected.
    pub fn set_criterion(&mut self, dimension: Dimension, value: &str) -> bool {
        if !self.accepts(dimension) {
            tracing::debug!("view: ignoring unsupported filter {dimension}");
            return false;
        }
        if !self.criteria.set(dimension, value) {
            return false;
        }
        self.after_criteria_change(dimension);
        true
    }

    pub fn clear_criterion(&mut self, dimension: Dimension) -> bool {
        if !self.criteria.clear(dimension) {
            return false;
        }
        self.after_criteria_change(dimension);
        true
    }

    fn after_criteria_change(&mut self, dimension: Dimension) {
        if self.config.strategy == Strategy::Paged || dimension == self.config.subject {
            self.dirty = true;
            return;
        }
        if self.is_saved_slice() {
            // Applied once the next search delivers a collection.
            return;
        }
        self.page = 1;
        self.rederive();
    }

    /// Sort by `field`, toggling direction if it is already the sort field.
    ///
    /// Returns `false` (and changes nothing) for fields that are not sortable.
    pub fn set_sort(&mut self, field: &str) -> bool {
        if !self.config.sortable.iter().any(|f| f == field) {
            tracing::debug!("view: ignoring sort on non-sortable field {field:?}");
            return false;
        }
        if self.is_saved_slice() {
            tracing::debug!("view: nothing to sort until the next search");
            return false;
        }
        self.sort = Some(SortSpec::next(self.sort.as_ref(), field));
        if self.config.strategy == Strategy::Bulk {
            self.page = 1;
        }
        self.rederive();
        true
    }

    /// Move to page `n`, clamped into `[1, total_pages]`.
    ///
    /// Bulk mode reslices and returns `None`; a saved slice stays where it
    /// is. Paged mode returns the plan for the page (using the current
    /// criteria) unless that page is already on screen and current.
    pub fn goto_page(&mut self, n: u32) -> Option<FetchPlan> {
        let target = clamp_page(n, self.total_pages());
        match self.config.strategy {
            Strategy::Bulk if self.is_saved_slice() => None,
            Strategy::Bulk => {
                self.page = target;
                self.reslice();
                None
            }
            Strategy::Paged => {
                if target == self.page && self.loaded && !self.dirty && self.in_flight.is_none()
                {
                    return None;
                }
                self.page = target;
                Some(self.begin_fetch(target))
            }
        }
    }

    /// Start a new search from page 1 with the current criteria.
    pub fn refetch(&mut self) -> FetchPlan {
        self.page = 1;
        self.begin_fetch(1)
    }

    /// Back to defaults. Any in-flight fetch is abandoned.
    pub fn reset(&mut self) {
        self.criteria = Criteria::default();
        self.sort = None;
        self.page = 1;
        self.raw.clear();
        self.derived.clear();
        self.displayed.clear();
        self.total_count = 0;
        self.dirty = false;
        self.loaded = false;
        self.latest_attempt += 1;
        self.in_flight = None;
    }

    fn begin_fetch(&mut self, page: u32) -> FetchPlan {
        self.dirty = false;
        self.latest_attempt += 1;
        self.in_flight = Some(InFlight {
            attempt: self.latest_attempt,
            page,
        });
        FetchPlan {
            attempt: self.latest_attempt,
            criteria: self.criteria.clone(),
            page,
            per_page: self.config.page_size,
        }
    }

    // -----------------------------------------------------------------------
    // Fetch completion
    // -----------------------------------------------------------------------

    /// Take ownership of the in-flight slot if `attempt` is current.
    fn accept(&mut self, attempt: u64) -> Option<InFlight> {
        match self.in_flight {
            Some(current) if current.attempt == attempt => self.in_flight.take(),
            _ => {
                tracing::debug!(
                    "view: dropping stale result for attempt {attempt} (latest {})",
                    self.latest_attempt
                );
                None
            }
        }
    }

    /// Apply a bulk fetch. Returns `false` if the result was stale.
    pub fn apply_bulk(&mut self, attempt: u64, records: Vec<Record>) -> bool {
        if self.accept(attempt).is_none() {
            return false;
        }
        self.raw = records;
        self.loaded = true;
        self.page = 1;
        self.rederive();
        true
    }

    /// Apply one server page. Returns `false` if the result was stale.
    pub fn apply_page(&mut self, attempt: u64, result: PageResult) -> bool {
        let Some(flight) = self.accept(attempt) else {
            return false;
        };
        self.raw = result.records;
        self.total_count = result.total_count;
        self.loaded = true;
        let page = result.page.unwrap_or(flight.page);
        self.page = clamp_page(page, self.total_pages());
        self.rederive();
        true
    }

    /// Record a failed fetch: zero results, criteria/sort/page untouched.
    pub fn apply_failure(&mut self, attempt: u64) -> bool {
        if self.accept(attempt).is_none() {
            return false;
        }
        self.raw.clear();
        self.derived.clear();
        self.displayed.clear();
        self.total_count = 0;
        self.loaded = true;
        true
    }

    // -----------------------------------------------------------------------
    // Derivation
    // -----------------------------------------------------------------------

    /// Recompute the derived collection from the full raw collection.
    fn rederive(&mut self) {
        self.derived = match self.config.strategy {
            Strategy::Bulk => {
                let local = self.criteria.without(self.config.subject);
                filter::filter_records(&self.raw, &local)
            }
            // The server already applied the criteria.
            Strategy::Paged => (0..self.raw.len()).collect(),
        };
        if let Some(spec) = &self.sort {
            sort::sort_indices(&self.raw, &mut self.derived, spec, &self.config.date_fields);
        }
        if self.config.strategy == Strategy::Bulk {
            self.total_count = self.derived.len() as u64;
        }
        self.reslice();
    }

    fn reslice(&mut self) {
        self.displayed = match self.config.strategy {
            Strategy::Bulk => {
                let range = slice_bounds(self.page, self.config.page_size, self.derived.len());
                self.derived[range]
                    .iter()
                    .map(|&i| self.raw[i].clone())
                    .collect()
            }
            Strategy::Paged => self.derived.iter().map(|&i| self.raw[i].clone()).collect(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn releases(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let repo = if i % 2 == 0 { "igloo-api" } else { "igloo-web" };
                Record::new()
                    .with("name", format!("Release {i}"))
                    .with("repo_name", repo)
                    .with("created_at", format!("2024-01-{:02}T00:00:00Z", i))
            })
            .collect()
    }

    fn bulk_view() -> QueryView {
        let mut config = ViewConfig::new(Strategy::Bulk, 10);
        config.sortable = vec!["name".into(), "created_at".into()];
        QueryView::new(config)
    }

    fn loaded_bulk(records: Vec<Record>) -> QueryView {
        let mut view = bulk_view();
        let plan = view.refetch();
        assert!(view.apply_bulk(plan.attempt, records));
        view
    }

    fn names(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.text("name").unwrap_or_default().into_owned())
            .collect()
    }

    #[test]
    fn twenty_five_releases_paginate_and_filter() {
        let mut view = loaded_bulk(releases(25));
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.displayed().len(), 10);
        assert_eq!(names(view.displayed())[0], "Release 1");
        assert_eq!(names(view.displayed())[9], "Release 10");

        view.goto_page(3);
        assert_eq!(view.page(), 3);

        // Even-numbered releases live in igloo-api: 12 of 25.
        assert!(view.set_criterion(Dimension::Repo, "igloo-api"));
        assert_eq!(view.total_count(), 12);
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.page(), 1);
        assert_eq!(names(view.displayed())[0], "Release 2");
    }

    #[test]
    fn sort_created_at_toggles_direction() {
        let records = vec![
            Record::new().with("name", "b").with("created_at", "2024-01-02T00:00:00Z"),
            Record::new().with("name", "c").with("created_at", "2024-01-03T00:00:00Z"),
            Record::new().with("name", "a").with("created_at", "2024-01-01T00:00:00Z"),
        ];
        let mut view = loaded_bulk(records);
        view.set_sort("created_at");
        assert_eq!(names(view.displayed()), vec!["a", "b", "c"]);
        view.set_sort("created_at");
        assert_eq!(view.sort().map(|s| s.direction), Some(Direction::Desc));
        assert_eq!(names(view.displayed()), vec!["c", "b", "a"]);
        view.set_sort("created_at");
        assert_eq!(view.sort().map(|s| s.direction), Some(Direction::Asc));
    }

    #[test]
    fn new_sort_field_starts_ascending() {
        let mut view = loaded_bulk(releases(3));
        view.set_sort("created_at");
        view.set_sort("created_at");
        view.set_sort("name");
        assert_eq!(view.sort(), Some(&SortSpec::ascending("name")));
    }

    #[test]
    fn non_sortable_field_is_ignored() {
        let mut view = loaded_bulk(releases(3));
        assert!(!view.set_sort("html_url"));
        assert!(view.sort().is_none());
    }

    #[test]
    fn goto_page_clamps_and_is_idempotent() {
        let mut view = loaded_bulk(releases(25));
        assert!(view.goto_page(99).is_none());
        assert_eq!(view.page(), 3);
        let first = names(view.displayed());
        view.goto_page(99);
        assert_eq!(names(view.displayed()), first);
        view.goto_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn empty_collection_has_one_page() {
        let mut view = loaded_bulk(Vec::new());
        assert_eq!(view.total_pages(), 1);
        view.goto_page(5);
        assert_eq!(view.page(), 1);
        assert!(view.displayed().is_empty());
    }

    #[test]
    fn filtering_never_runs_over_a_sliced_page() {
        let mut view = loaded_bulk(releases(25));
        view.goto_page(2);
        view.set_criterion(Dimension::Repo, "igloo-web");
        // Release 1 lives on page 1 of the unfiltered view but must match.
        assert_eq!(names(view.displayed())[0], "Release 1");
        view.clear_criterion(Dimension::Repo);
        assert_eq!(view.total_count(), 25);
    }

    #[test]
    fn subject_change_marks_dirty_without_rederiving() {
        let mut view = loaded_bulk(releases(25));
        view.goto_page(2);
        assert!(view.set_criterion(Dimension::Username, "alice"));
        assert!(view.is_dirty());
        assert_eq!(view.page(), 2);
        assert_eq!(view.total_count(), 25);
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_one() {
        let mut view = bulk_view();
        view.set_criterion(Dimension::Username, "alice");
        let alice = view.refetch();
        view.set_criterion(Dimension::Username, "bob");
        let bob = view.refetch();
        assert!(alice.attempt < bob.attempt);

        let bob_rows = vec![Record::new().with("name", "bob's release")];
        assert!(view.apply_bulk(bob.attempt, bob_rows));
        let alice_rows = vec![Record::new().with("name", "alice's release")];
        assert!(!view.apply_bulk(alice.attempt, alice_rows));

        assert_eq!(names(view.displayed()), vec!["bob's release"]);
    }

    #[test]
    fn stale_response_arriving_first_is_also_dropped() {
        let mut view = bulk_view();
        let first = view.refetch();
        let second = view.refetch();
        assert!(!view.apply_bulk(first.attempt, releases(3)));
        assert!(view.is_loading());
        assert!(view.apply_bulk(second.attempt, releases(5)));
        assert!(!view.is_loading());
        assert_eq!(view.total_count(), 5);
    }

    #[test]
    fn failure_clears_data_but_keeps_criteria() {
        let mut view = loaded_bulk(releases(25));
        view.set_criterion(Dimension::Repo, "igloo");
        view.set_sort("name");
        view.goto_page(2);
        let plan = view.refetch();
        assert!(view.apply_failure(plan.attempt));
        assert!(view.displayed().is_empty());
        assert_eq!(view.total_count(), 0);
        assert_eq!(view.criteria().get(Dimension::Repo), Some("igloo"));
        assert!(view.sort().is_some());
    }

    #[test]
    fn reset_abandons_in_flight_fetch() {
        let mut view = loaded_bulk(releases(5));
        view.set_criterion(Dimension::Repo, "api");
        let plan = view.refetch();
        view.reset();
        assert!(!view.apply_bulk(plan.attempt, releases(5)));
        assert!(view.criteria().is_empty());
        assert!(view.displayed().is_empty());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn paged_mode_marks_dirty_and_fetches_pages() {
        let mut view = QueryView::new(ViewConfig::new(Strategy::Paged, 10));
        view.set_criterion(Dimension::Repo, "igloo-api");
        assert!(view.is_dirty());
        let plan = view.refetch();
        assert_eq!(plan.page, 1);
        assert_eq!(plan.criteria.get(Dimension::Repo), Some("igloo-api"));
        assert!(view.apply_page(
            plan.attempt,
            PageResult {
                records: releases(10),
                total_count: 42,
                page: Some(1),
            }
        ));
        assert_eq!(view.total_pages(), 5);
        assert_eq!(view.displayed().len(), 10);

        assert!(view.goto_page(1).is_none());
        let next = view.goto_page(9).expect("paged mode fetches");
        assert_eq!(next.page, 5);
        assert_eq!(view.page(), 5);
    }

    #[test]
    fn window_follows_page() {
        let mut view = loaded_bulk(releases(25));
        view.goto_page(2);
        assert_eq!(view.window().pages, 1..=3);
        assert_eq!(view.summary("releases"), "page 2 of 3 (25 releases)");
    }

    #[test]
    fn snapshot_round_trips_through_from_snapshot() {
        let mut view = loaded_bulk(releases(25));
        view.set_criterion(Dimension::Repo, "igloo-api");
        view.set_sort("created_at");
        view.set_sort("created_at");
        view.goto_page(2);
        let snap = view.snapshot("alice", true);

        let restored = QueryView::from_snapshot(view.config().clone(), snap);
        assert_eq!(restored.page(), 2);
        assert_eq!(restored.displayed(), view.displayed());
        assert_eq!(restored.sort(), view.sort());
        assert!(!restored.is_dirty());
    }

    #[test]
    fn snapshot_without_raw_restores_displayed_slice_as_stale() {
        let mut view = loaded_bulk(releases(25));
        view.goto_page(3);
        let snap = view.snapshot("", false);
        assert!(snap.raw.is_none());

        let restored = QueryView::from_snapshot(view.config().clone(), snap);
        assert_eq!(restored.displayed(), view.displayed());
        assert_eq!(restored.page(), 3);
        assert!(restored.is_dirty());
    }

    #[test]
    fn saved_slice_holds_until_the_next_search() {
        let mut view = loaded_bulk(releases(25));
        view.goto_page(2);
        let shown = names(view.displayed());
        let mut restored = QueryView::from_snapshot(view.config().clone(), view.snapshot("", false));
        assert!(restored.is_saved_slice());

        assert!(restored.goto_page(3).is_none());
        assert!(!restored.set_sort("name"));
        assert!(restored.set_criterion(Dimension::Repo, "igloo-api"));
        assert_eq!(restored.page(), 2);
        assert_eq!(restored.total_count(), 25);
        assert_eq!(names(restored.displayed()), shown);

        // The pending criterion applies to the next collection.
        let plan = restored.refetch();
        assert!(restored.apply_bulk(plan.attempt, releases(25)));
        assert!(!restored.is_saved_slice());
        assert_eq!(restored.total_count(), 12);
    }

    #[test]
    fn unsupported_dimension_is_rejected() {
        let mut config = ViewConfig::new(Strategy::Paged, 10);
        config.dimensions = vec![Dimension::Username, Dimension::Repo];
        let mut view = QueryView::new(config.clone());
        assert!(!view.set_criterion(Dimension::Author, "bob"));
        assert!(view.criteria().get(Dimension::Author).is_none());
        assert!(!view.is_dirty());

        let mut criteria = Criteria::new();
        criteria.set(Dimension::Repo, "igloo-api");
        criteria.set(Dimension::State, "closed");
        let restored = QueryView::from_snapshot(
            config,
            ViewSnapshot {
                criteria,
                ..ViewSnapshot::default()
            },
        );
        assert_eq!(restored.criteria().get(Dimension::Repo), Some("igloo-api"));
        assert!(restored.criteria().get(Dimension::State).is_none());
    }

    #[test]
    fn paged_page_change_consumes_pending_criteria() {
        let mut view = QueryView::new(ViewConfig::new(Strategy::Paged, 10));
        let plan = view.refetch();
        view.apply_page(
            plan.attempt,
            PageResult {
                records: releases(10),
                total_count: 30,
                page: None,
            },
        );
        view.set_criterion(Dimension::Repo, "igloo-api");
        assert!(view.is_dirty());

        let plan = view.goto_page(2).expect("page fetch");
        assert_eq!(plan.criteria.get(Dimension::Repo), Some("igloo-api"));
        assert!(!view.is_dirty());
        view.apply_page(
            plan.attempt,
            PageResult {
                records: releases(10),
                total_count: 30,
                page: Some(2),
            },
        );
        assert!(view.goto_page(2).is_none());
    }
}
