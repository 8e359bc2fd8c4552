use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::engine::{EngineHandle, Event, Request};
use crate::persist::{self, StateStore};
use crate::reference::{Typeahead, distinct_values};
use crate::types::{Dimension, Record, RefKind};
use crate::view::{FetchPlan, PageResult, PageWindow, QueryView, Strategy};

use super::{DashboardConfig, SourceKind};

/// One mounted dashboard: a [`QueryView`] wired to the engine and a store.
///
/// Everything here runs on the caller's thread. Engine replies queue up on
/// the dashboard's own channel until [`Dashboard::poll`] or
/// [`Dashboard::wait_idle`] drains them.
pub struct Dashboard<S: StateStore> {
    config: DashboardConfig,
    view: QueryView,
    search: Typeahead,
    /// Typeaheads for filter inputs backed by a reference list.
    filters: Vec<(Dimension, Typeahead)>,
    references: HashMap<RefKind, Arc<Vec<String>>>,
    pending: HashSet<RefKind>,
    last_error: Option<String>,
    engine: EngineHandle,
    reply_tx: Sender<Event>,
    reply_rx: Receiver<Event>,
    store: S,
}

impl<S: StateStore> Dashboard<S> {
    /// Mount the dashboard, restoring whatever `store` holds for it.
    ///
    /// No records are fetched here; a restored collection is shown as is.
    pub fn open(config: DashboardConfig, engine: EngineHandle, store: S) -> Self {
        let snapshot = persist::load(&store, &config.id);
        let search = Typeahead::new(config.suggest).with_input(snapshot.search.clone());
        let filters = config
            .filter_suggest
            .iter()
            .map(|&(dimension, kind)| {
                let input = snapshot.criteria.get(dimension).unwrap_or_default();
                (dimension, Typeahead::new(kind).with_input(input))
            })
            .collect();
        let view = QueryView::from_snapshot(config.view.clone(), snapshot);
        let (reply_tx, reply_rx) = std::sync::mpsc::channel();

        tracing::debug!(
            "dashboard[{}]: opened at page {} (loaded={})",
            config.id,
            view.page(),
            view.is_loaded()
        );

        let mut board = Self {
            config,
            view,
            search,
            filters,
            references: HashMap::new(),
            pending: HashSet::new(),
            last_error: None,
            engine,
            reply_tx,
            reply_rx,
            store,
        };
        board.request_references();
        board
    }

    /// Every reference list this dashboard offers suggestions from.
    fn reference_kinds(&self) -> Vec<RefKind> {
        let mut kinds = vec![self.search.kind()];
        for (_, typeahead) in &self.filters {
            if !kinds.contains(&typeahead.kind()) {
                kinds.push(typeahead.kind());
            }
        }
        kinds
    }

    fn request_references(&mut self) {
        for kind in self.reference_kinds() {
            self.pending.insert(kind);
            self.engine.send(Request::FetchReference {
                kind,
                reply_tx: self.reply_tx.clone(),
            });
        }
    }

    fn reference(&self, kind: RefKind) -> &[String] {
        self.references
            .get(&kind)
            .map(|values| values.as_slice())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn view(&self) -> &QueryView {
        &self.view
    }

    pub fn displayed(&self) -> &[Record] {
        self.view.displayed()
    }

    pub fn window(&self) -> PageWindow {
        self.view.window()
    }

    pub fn summary(&self) -> String {
        self.view.summary(self.config.noun)
    }

    pub fn search_text(&self) -> &str {
        self.search.input()
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // -----------------------------------------------------------------------
    // Search box
    // -----------------------------------------------------------------------

    pub fn type_search(&mut self, text: &str) {
        self.search.type_text(text);
    }

    /// Suggestions for the current search text.
    pub fn suggestions(&self) -> Vec<&str> {
        self.search.suggestions(self.reference(self.search.kind()))
    }

    /// Suggestions drawn from `field` of the fetched collection.
    pub fn field_suggestions(&self, field: &str) -> Vec<String> {
        distinct_values(self.view.raw(), field)
    }

    /// Pick a suggestion and search for it.
    pub fn select_suggestion(&mut self, value: &str) {
        self.search.select(value);
        self.search_resolved();
    }

    /// Search for the current input text.
    pub fn submit(&mut self) {
        self.search.submit();
        self.search_resolved();
    }

    fn search_resolved(&mut self) {
        let value = self.search.resolved().unwrap_or_default().to_owned();
        let subject = self.config.view.subject;

        if value.is_empty() && self.config.source == SourceKind::ReposByTag {
            // Nothing to look up: start over.
            self.reset();
            return;
        }
        if value.is_empty() {
            self.view.clear_criterion(subject);
        } else {
            self.view.set_criterion(subject, &value);
        }
        self.refetch();
    }

    // -----------------------------------------------------------------------
    // Filter inputs with reference-list suggestions
    // -----------------------------------------------------------------------

    fn filter_input(&self, dimension: Dimension) -> Option<&Typeahead> {
        self.filters
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, typeahead)| typeahead)
    }

    fn filter_input_mut(&mut self, dimension: Dimension) -> Option<&mut Typeahead> {
        self.filters
            .iter_mut()
            .find(|(d, _)| *d == dimension)
            .map(|(_, typeahead)| typeahead)
    }

    /// Text typed into the filter input for `dimension`. The criterion is
    /// left alone until a suggestion is picked.
    pub fn type_filter(&mut self, dimension: Dimension, text: &str) {
        if let Some(typeahead) = self.filter_input_mut(dimension) {
            typeahead.type_text(text);
        }
    }

    /// Suggestions for the filter input of `dimension`; empty when the
    /// dimension has no reference-backed input.
    pub fn filter_suggestions(&self, dimension: Dimension) -> Vec<&str> {
        match self.filter_input(dimension) {
            Some(typeahead) => typeahead.suggestions(self.reference(typeahead.kind())),
            None => Vec::new(),
        }
    }

    /// Pick a suggestion for `dimension` and set it as the criterion.
    pub fn select_filter(&mut self, dimension: Dimension, value: &str) -> bool {
        if let Some(typeahead) = self.filter_input_mut(dimension) {
            typeahead.select(value);
        }
        self.set_criterion(dimension, value)
    }

    // -----------------------------------------------------------------------
    // Criteria, sort, paging
    // -----------------------------------------------------------------------

    /// Returns whether the criterion changed. Paged dashboards (and subject
    /// changes) only take effect on the next [`Dashboard::refetch`].
    pub fn set_criterion(&mut self, dimension: Dimension, value: &str) -> bool {
        let changed = self.view.set_criterion(dimension, value);
        if changed && !self.view.is_dirty() {
            self.persist();
        }
        changed
    }

    pub fn clear_criterion(&mut self, dimension: Dimension) -> bool {
        let changed = self.view.clear_criterion(dimension);
        if changed && !self.view.is_dirty() {
            self.persist();
        }
        changed
    }

    pub fn set_sort(&mut self, field: &str) -> bool {
        let changed = self.view.set_sort(field);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn goto_page(&mut self, n: u32) {
        match self.view.goto_page(n) {
            // Saved once the page arrives.
            Some(plan) => self.send_fetch(&plan),
            None => self.persist(),
        }
    }

    /// Fetch from page 1 with the current criteria.
    pub fn refetch(&mut self) {
        let plan = self.view.refetch();
        self.send_fetch(&plan);
    }

    /// Fetch only if nothing is on screen yet.
    pub fn ensure_loaded(&mut self) {
        if self.view.is_loaded() || self.view.is_loading() || !self.view.displayed().is_empty() {
            return;
        }
        if self.config.view.strategy == Strategy::Bulk
            && self.view.criteria().get(self.config.view.subject).is_none()
        {
            // A bulk source needs a subject to fetch anything useful.
            return;
        }
        self.refetch();
    }

    /// Back to defaults, forgetting the persisted state.
    pub fn reset(&mut self) {
        self.view.reset();
        self.search.clear();
        for (_, typeahead) in &mut self.filters {
            typeahead.clear();
        }
        self.last_error = None;
        persist::clear(&mut self.store, &self.config.id);
    }

    /// Drop the cached reference lists and fetch them again.
    pub fn reload_reference(&mut self) {
        for kind in self.reference_kinds() {
            self.engine.send(Request::InvalidateReference { kind });
        }
        self.request_references();
    }

    fn send_fetch(&self, plan: &FetchPlan) {
        let query = self.config.query_for(plan);
        tracing::debug!(
            "dashboard[{}]: fetch #{} {} page {}",
            self.config.id,
            plan.attempt,
            query.path(),
            plan.page
        );
        self.engine.send(Request::FetchRecords {
            dashboard: self.config.id.clone(),
            attempt: plan.attempt,
            query,
            reply_tx: self.reply_tx.clone(),
        });
    }

    fn persist(&mut self) {
        let snapshot = self.view.snapshot(self.search.input(), self.config.persist_raw);
        persist::save(&mut self.store, &self.config.id, &snapshot);
    }

    // -----------------------------------------------------------------------
    // Engine events
    // -----------------------------------------------------------------------

    /// Apply every event already queued. Returns how many were handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.reply_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Block until no fetch is in flight and the reference lists arrived, or
    /// until `timeout` elapses. Returns whether the dashboard went idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.view.is_loading() || !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.reply_rx.recv_timeout(remaining) {
                Ok(event) => self.handle_event(event),
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return false,
            }
        }
        true
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ReferenceFetched { kind, values } => {
                if self.pending.remove(&kind) || self.references.contains_key(&kind) {
                    self.references.insert(kind, values);
                }
            }
            Event::RecordsFetched {
                dashboard,
                attempt,
                records,
                total_count,
                page,
            } => {
                if dashboard != self.config.id {
                    return;
                }
                let applied = match self.config.view.strategy {
                    Strategy::Bulk => self.view.apply_bulk(attempt, records),
                    Strategy::Paged => self.view.apply_page(
                        attempt,
                        PageResult {
                            records,
                            total_count: total_count.unwrap_or(0),
                            page,
                        },
                    ),
                };
                if applied {
                    self.last_error = None;
                    self.persist();
                }
            }
            Event::FetchError {
                dashboard,
                attempt,
                context,
                message,
            } => {
                if dashboard != self.config.id || !self.view.apply_failure(attempt) {
                    return;
                }
                tracing::warn!("dashboard[{dashboard}]: {context}: {message}");
                self.last_error = Some(message);
                self.persist();
            }
        }
    }
}
