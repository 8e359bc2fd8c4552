use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::backend::SourceQuery;
use crate::types::{Record, RefKind};

/// Handle to the backend engine held by the dashboard side.
///
/// Cheaply cloneable. When the last handle is dropped the sender channel
/// closes, signalling the engine to shut down.
#[derive(Clone)]
pub struct EngineHandle {
    tx: tokio::sync::mpsc::UnboundedSender<Request>,
}

impl EngineHandle {
    pub(super) fn new(tx: tokio::sync::mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Send a request to the engine. Non-blocking; returns immediately.
    pub fn send(&self, req: Request) {
        // Ignore errors: if the receiver is gone the engine has already shut down.
        let _ = self.tx.send(req);
    }
}

/// Trait implemented by both `BackendEngine` and `StubEngine`.
pub trait Engine: Send + 'static {
    fn start(self) -> EngineHandle;
}

/// All operations the dashboard side can send to the engine.
pub enum Request {
    // -----------------------------------------------------------------------
    // Reference data
    // -----------------------------------------------------------------------
    FetchReference {
        kind: RefKind,
        reply_tx: Sender<Event>,
    },
    InvalidateReference {
        kind: RefKind,
    },

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------
    /// Run `query` on behalf of one dashboard. `attempt` is echoed back so
    /// the dashboard can drop superseded results.
    FetchRecords {
        dashboard: String,
        attempt: u64,
        query: SourceQuery,
        reply_tx: Sender<Event>,
    },

    // -----------------------------------------------------------------------
    // Control
    // -----------------------------------------------------------------------
    Shutdown,
}

/// All events the engine can push back to dashboards.
#[derive(Debug)]
pub enum Event {
    ReferenceFetched {
        kind: RefKind,
        values: Arc<Vec<String>>,
    },
    RecordsFetched {
        dashboard: String,
        attempt: u64,
        records: Vec<Record>,
        total_count: Option<u64>,
        page: Option<u32>,
    },
    /// Unified error event for record fetch failures.
    FetchError {
        dashboard: String,
        attempt: u64,
        context: String,
        message: String,
    },
}
