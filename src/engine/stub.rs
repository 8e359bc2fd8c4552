use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::SourceQuery;
use crate::filter;
use crate::types::{Criteria, Dimension, Record, RefKind};
use crate::view::slice_bounds;

use super::interface::{Engine, EngineHandle, Event, Request};

/// A stub engine that serves pre-loaded fixture data without any network calls.
///
/// It answers each query the way the backend would: `username` selects by
/// `author`, paged endpoints slice and report a total count, and
/// `/repos-by-tag` matches `tag_name` exactly.
#[derive(Default)]
pub struct StubEngine {
    pub releases: Vec<Record>,
    pub prs: Vec<Record>,
    /// Rows of `{repo_name, tag_name}`.
    pub tag_repos: Vec<Record>,
    pub people: Vec<String>,
    pub repos: Vec<String>,
    pub tags: Vec<String>,
    /// Answer every record fetch with an error.
    pub fail_fetches: bool,
}

impl Engine for StubEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("stub tokio runtime");
            rt.block_on(self.run_loop(rx));
        });
        EngineHandle::new(tx)
    }
}

impl StubEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        while let Some(req) = rx.recv().await {
            match req {
                Request::FetchReference { kind, reply_tx } => {
                    let values = match kind {
                        RefKind::Users => self.people.clone(),
                        RefKind::Repos => self.repos.clone(),
                        RefKind::Tags => self.tags.clone(),
                    };
                    let _ = reply_tx.send(Event::ReferenceFetched {
                        kind,
                        values: Arc::new(values),
                    });
                }

                // Nothing cached in the stub
                Request::InvalidateReference { .. } => {}

                Request::FetchRecords {
                    dashboard,
                    attempt,
                    query,
                    reply_tx,
                } => {
                    let event = if self.fail_fetches {
                        Event::FetchError {
                            dashboard,
                            attempt,
                            context: "stub".into(),
                            message: format!("{} unavailable in stub", query.path()),
                        }
                    } else {
                        let (records, total_count, page) = self.answer(&query);
                        Event::RecordsFetched {
                            dashboard,
                            attempt,
                            records,
                            total_count,
                            page,
                        }
                    };
                    let _ = reply_tx.send(event);
                }

                Request::Shutdown => break,
            }
        }
    }

    fn answer(&self, query: &SourceQuery) -> (Vec<Record>, Option<u64>, Option<u32>) {
        match query {
            SourceQuery::UserReleases {
                username,
                repo,
                per_page,
            } => {
                let mut criteria = by_author(username);
                criteria.set(Dimension::Repo, repo);
                let mut rows = select(&self.releases, &criteria);
                rows.truncate(*per_page as usize);
                (rows, None, None)
            }
            SourceQuery::AllPrs {
                username,
                repo,
                from_date,
                to_date,
                page,
                per_page,
            } => {
                let mut criteria = by_author(username);
                criteria.set(Dimension::Repo, repo);
                criteria.set(Dimension::DateFrom, from_date);
                criteria.set(Dimension::DateTo, to_date);
                paged(select(&self.prs, &criteria), *page, *per_page)
            }
            SourceQuery::CategoryPrs {
                username,
                page,
                per_page,
                ..
            } => paged(select(&self.prs, &by_author(username)), *page, *per_page),
            SourceQuery::ReposByTag { tag } => {
                let rows: Vec<Record> = self
                    .tag_repos
                    .iter()
                    .filter(|r| r.text("tag_name").is_some_and(|t| t == tag.as_str()))
                    .cloned()
                    .collect();
                let total = rows.len() as u64;
                (rows, Some(total), None)
            }
        }
    }
}

fn by_author(username: &str) -> Criteria {
    let mut criteria = Criteria::default();
    criteria.set(Dimension::Author, username);
    criteria
}

fn select(records: &[Record], criteria: &Criteria) -> Vec<Record> {
    filter::filter_records(records, criteria)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

fn paged(rows: Vec<Record>, page: u32, per_page: u32) -> (Vec<Record>, Option<u64>, Option<u32>) {
    let total = rows.len() as u64;
    let range = slice_bounds(page, per_page, rows.len());
    (rows[range].to_vec(), Some(total), Some(page))
}
