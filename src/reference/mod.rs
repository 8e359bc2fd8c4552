//! Session-lifetime cache of the reference lists (users, repos, tags) that
//! feed typeahead suggestions.

mod typeahead;

pub use typeahead::{DEFAULT_LIMIT, Typeahead, distinct_values};

use std::sync::Arc;

use moka::future::Cache;

use crate::backend::BackendClient;
use crate::types::RefKind;

/// Fetch-once cache over the backend's reference endpoints.
///
/// Concurrent first lookups of one kind share a single request. A failed
/// fetch is logged and yields an empty list without poisoning the cache, so
/// the next lookup tries again.
#[derive(Clone)]
pub struct ReferenceCache {
    cache: Cache<RefKind, Arc<Vec<String>>>,
    client: BackendClient,
}

impl ReferenceCache {
    pub fn new(client: BackendClient) -> Self {
        Self {
            cache: Cache::builder().max_capacity(8).build(),
            client,
        }
    }

    pub async fn get(&self, kind: RefKind) -> Arc<Vec<String>> {
        let client = &self.client;
        let result = self
            .cache
            .try_get_with(kind, async move {
                let values = client.reference_list(kind).await?;
                tracing::debug!("reference: loaded {} {kind}", values.len());
                Ok::<_, crate::error::Error>(Arc::new(values))
            })
            .await;
        match result {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("reference: cannot load {kind}: {:#}", anyhow::Error::from(e));
                Arc::default()
            }
        }
    }

    /// The cached list, if one was loaded.
    pub async fn cached(&self, kind: RefKind) -> Option<Arc<Vec<String>>> {
        self.cache.get(&kind).await
    }

    pub async fn invalidate(&self, kind: RefKind) {
        self.cache.invalidate(&kind).await;
    }
}
