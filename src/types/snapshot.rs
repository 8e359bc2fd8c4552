use super::{Criteria, Record, SortSpec};

/// Everything needed to rebuild a dashboard after it was torn down.
///
/// `raw` is only present for client-side dashboards that persist their
/// fetched collection; without it the restored view shows `displayed` until
/// the next search.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    /// Text in the subject input box (may differ from the resolved criterion).
    pub search: String,
    pub criteria: Criteria,
    pub sort: Option<SortSpec>,
    pub page: u32,
    pub total_count: Option<u64>,
    pub raw: Option<Vec<Record>>,
    pub displayed: Option<Vec<Record>>,
}

impl Default for ViewSnapshot {
    fn default() -> Self {
        Self {
            search: String::new(),
            criteria: Criteria::default(),
            sort: None,
            page: 1,
            total_count: None,
            raw: None,
            displayed: None,
        }
    }
}
