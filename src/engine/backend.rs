use std::sync::mpsc::Sender;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::backend::{BackendClient, SourceQuery};
use crate::reference::ReferenceCache;

use super::interface::{Engine, EngineHandle, Event, Request};

/// The real engine, talking HTTP to the dashboard backend.
pub struct BackendEngine {
    client: BackendClient,
}

impl BackendEngine {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

impl Engine for BackendEngine {
    fn start(self) -> EngineHandle {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<Request>();
        let handle = EngineHandle::new(tx);
        let _ = std::thread::Builder::new()
            .name("board-engine".to_owned())
            .spawn(move || {
                let rt = tokio::runtime::Runtime::new().expect("tokio runtime init");
                rt.block_on(self.run_loop(rx));
            });
        handle
    }
}

impl BackendEngine {
    async fn run_loop(self, mut rx: UnboundedReceiver<Request>) {
        let references = ReferenceCache::new(self.client.clone());

        while let Some(req) = rx.recv().await {
            match req {
                Request::Shutdown => {
                    tracing::debug!("engine: shutting down");
                    break;
                }
                // Inline, so a FetchReference queued right after it misses the cache.
                Request::InvalidateReference { kind } => references.invalidate(kind).await,
                // Each request runs on its own task, so a slow query never
                // holds up a newer one and replies may arrive out of order.
                req => handle_request(req, &self.client, &references),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Request dispatch
// ---------------------------------------------------------------------------

fn handle_request(req: Request, client: &BackendClient, references: &ReferenceCache) {
    match req {
        Request::FetchReference { kind, reply_tx } => {
            let references = references.clone();
            tokio::spawn(async move {
                let values = references.get(kind).await;
                tracing::debug!("engine: sending ReferenceFetched {kind} count={}", values.len());
                let _ = reply_tx.send(Event::ReferenceFetched { kind, values });
            });
        }

        Request::FetchRecords {
            dashboard,
            attempt,
            query,
            reply_tx,
        } => {
            let client = client.clone();
            tokio::spawn(fetch_records(client, dashboard, attempt, query, reply_tx));
        }

        Request::InvalidateReference { .. } | Request::Shutdown => {}
    }
}

async fn fetch_records(
    client: BackendClient,
    dashboard: String,
    attempt: u64,
    query: SourceQuery,
    reply_tx: Sender<Event>,
) {
    match client.fetch(&query).await {
        Ok(fetched) => {
            tracing::debug!(
                "engine: sending RecordsFetched[{dashboard}#{attempt}] count={}",
                fetched.records.len()
            );
            let _ = reply_tx.send(Event::RecordsFetched {
                dashboard,
                attempt,
                records: fetched.records,
                total_count: fetched.total_count,
                page: fetched.page,
            });
        }
        Err(e) => {
            let message = format!("{:#}", anyhow::Error::from(e));
            tracing::debug!("engine: FetchRecords[{dashboard}#{attempt}] error: {message}");
            let _ = reply_tx.send(Event::FetchError {
                context: format!("FetchRecords {}", query.path()),
                dashboard,
                attempt,
                message,
            });
        }
    }
}
