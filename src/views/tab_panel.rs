use std::collections::{BTreeMap, BTreeSet};

use crate::backend::SourceQuery;
use crate::engine::Event;
use crate::types::{PrCategory, Record};

/// A "load more" list of one PR category for one user.
///
/// Pages are appended strictly in request order even when replies arrive
/// out of order. Changing the user or the category starts a new generation;
/// replies tagged with an older generation are dropped.
#[derive(Debug)]
pub struct TabPanel {
    id: String,
    category: PrCategory,
    username: String,
    per_page: u32,
    generation: u64,
    items: Vec<Record>,
    total_count: Option<u64>,
    /// Last page appended to `items`.
    applied_through: u32,
    /// Next page to request.
    next_page: u32,
    /// Pages that arrived ahead of an earlier one.
    buffered: BTreeMap<u32, Vec<Record>>,
    in_flight: BTreeSet<u32>,
    error: Option<String>,
}

impl TabPanel {
    pub fn new(category: PrCategory, per_page: u32) -> Self {
        Self {
            id: format!("category.{category}"),
            category,
            username: String::new(),
            per_page: per_page.max(1),
            generation: 0,
            items: Vec::new(),
            total_count: None,
            applied_through: 0,
            next_page: 1,
            buffered: BTreeMap::new(),
            in_flight: BTreeSet::new(),
            error: None,
        }
    }

    /// Dashboard id carried by this panel's engine requests.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> PrCategory {
        self.category
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Until the first page reports a total, assume there is something to load.
    pub fn has_more(&self) -> bool {
        self.total_count.is_none_or(|total| {
            u64::from(self.next_page - 1) * u64::from(self.per_page) < total
        })
    }

    /// e.g. `"50 of 120 loaded"`.
    pub fn summary(&self) -> String {
        match self.total_count {
            Some(total) => format!("{} of {total} loaded", self.items.len()),
            None => format!("{} loaded", self.items.len()),
        }
    }

    pub fn set_username(&mut self, username: &str) {
        let username = username.trim();
        if username != self.username {
            self.username = username.to_owned();
            self.restart();
        }
    }

    pub fn set_category(&mut self, category: PrCategory) {
        if category != self.category {
            self.category = category;
            self.id = format!("category.{category}");
            self.restart();
        }
    }

    fn restart(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.total_count = None;
        self.applied_through = 0;
        self.next_page = 1;
        self.buffered.clear();
        self.in_flight.clear();
        self.error = None;
    }

    /// The next page to request, with the generation to tag it with.
    pub fn load_more(&mut self) -> Option<(u64, SourceQuery)> {
        if !self.has_more() {
            return None;
        }
        let page = self.next_page;
        self.next_page += 1;
        self.in_flight.insert(page);
        self.error = None;
        Some((
            self.generation,
            SourceQuery::CategoryPrs {
                category: self.category,
                username: self.username.clone(),
                page,
                per_page: self.per_page,
            },
        ))
    }

    /// Accept one page. Returns `false` for a superseded generation.
    pub fn apply(&mut self, generation: u64, page: u32, records: Vec<Record>, total: u64) -> bool {
        if generation != self.generation || page <= self.applied_through {
            tracing::debug!("tab[{}]: dropping stale page {page}", self.id);
            return false;
        }
        self.in_flight.remove(&page);
        self.total_count = Some(total);
        self.buffered.insert(page, records);
        while let Some(rows) = self.buffered.remove(&(self.applied_through + 1)) {
            self.items.extend(rows);
            self.applied_through += 1;
        }
        true
    }

    /// Record a failed page. The next `load_more` retries from the first
    /// missing page.
    pub fn apply_failure(&mut self, generation: u64, page: u32, message: String) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight.remove(&page);
        self.next_page = self.next_page.min(page);
        self.error = Some(message);
        true
    }

    /// Route an engine event to [`TabPanel::apply`] or
    /// [`TabPanel::apply_failure`]. `page` is the page the request asked for.
    pub fn handle_event(&mut self, event: Event, page: u32) -> bool {
        match event {
            Event::RecordsFetched {
                dashboard,
                attempt,
                records,
                total_count,
                page: served,
            } if dashboard == self.id => self.apply(
                attempt,
                served.unwrap_or(page),
                records,
                total_count.unwrap_or(0),
            ),
            Event::FetchError {
                dashboard,
                attempt,
                message,
                ..
            } if dashboard == self.id => self.apply_failure(attempt, page, message),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(page: u32, n: u32) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new().with("number", page * 100 + i))
            .collect()
    }

    fn numbers(panel: &TabPanel) -> Vec<u64> {
        panel
            .items()
            .iter()
            .filter_map(|r| r.get("number").and_then(serde_json::Value::as_u64))
            .collect()
    }

    #[test]
    fn pages_append_in_request_order() {
        let mut panel = TabPanel::new(PrCategory::Created, 2);
        panel.set_username("alice");
        let (g, _) = panel.load_more().unwrap();
        let (_, q2) = panel.load_more().unwrap();
        assert_eq!(q2.page(), Some(2));

        // Page 2 lands first and waits for page 1.
        assert!(panel.apply(g, 2, rows(2, 2), 5));
        assert!(panel.items().is_empty());
        assert!(panel.apply(g, 1, rows(1, 2), 5));
        assert_eq!(numbers(&panel), vec![100, 101, 200, 201]);
        assert!(!panel.is_loading());
        assert!(panel.has_more());

        panel.load_more().unwrap();
        assert!(panel.apply(g, 3, rows(3, 1), 5));
        assert!(!panel.has_more());
        assert!(panel.load_more().is_none());
        assert_eq!(panel.summary(), "5 of 5 loaded");
    }

    #[test]
    fn username_change_drops_in_flight_pages() {
        let mut panel = TabPanel::new(PrCategory::Assigned, 10);
        panel.set_username("alice");
        let (old, _) = panel.load_more().unwrap();
        panel.set_username("bob");
        let (new, q) = panel.load_more().unwrap();
        assert_ne!(old, new);
        assert!(matches!(q, SourceQuery::CategoryPrs { ref username, page: 1, .. } if username == "bob"));

        assert!(!panel.apply(old, 1, rows(1, 3), 3));
        assert!(panel.items().is_empty());
        assert!(panel.apply(new, 1, rows(1, 1), 1));
        assert_eq!(panel.items().len(), 1);
    }

    #[test]
    fn category_change_restarts() {
        let mut panel = TabPanel::new(PrCategory::Created, 10);
        let (g, _) = panel.load_more().unwrap();
        panel.apply(g, 1, rows(1, 3), 30);
        panel.set_category(PrCategory::ReviewRequested);
        assert!(panel.items().is_empty());
        assert_eq!(panel.total_count(), None);
        assert_eq!(panel.id(), "category.review-requested");
    }

    #[test]
    fn failure_allows_retry_of_the_same_page() {
        let mut panel = TabPanel::new(PrCategory::Reviewed, 10);
        let (g, _) = panel.load_more().unwrap();
        panel.apply(g, 1, rows(1, 10), 25);
        panel.load_more().unwrap();
        assert!(panel.apply_failure(g, 2, "timeout".into()));
        assert_eq!(panel.error(), Some("timeout"));

        let (_, retry) = panel.load_more().unwrap();
        assert_eq!(retry.page(), Some(2));
        assert!(panel.error().is_none());
    }

    #[test]
    fn events_for_other_dashboards_are_ignored() {
        let mut panel = TabPanel::new(PrCategory::Created, 10);
        let (g, _) = panel.load_more().unwrap();
        let event = Event::RecordsFetched {
            dashboard: "releases".into(),
            attempt: g,
            records: rows(1, 1),
            total_count: Some(1),
            page: Some(1),
        };
        assert!(!panel.handle_event(event, 1));
        assert!(panel.is_loading());
    }
}
