//! Persistence adapter: saves and restores a dashboard's [`ViewSnapshot`].
//!
//! Each part of the snapshot lives under its own key, namespaced by the
//! dashboard id (`"{id}.{part}"`), and is JSON-encoded. Parts are read
//! independently: an absent key means unset and a malformed one falls back
//! to its default, so one bad value never discards the rest of the state.

mod store;

pub use store::{FileStore, MemoryStore, StateStore};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::types::{Criteria, Dimension, Record, SortSpec, ViewSnapshot};

const SEARCH: &str = "search";
const SORT: &str = "sort";
const PAGE: &str = "page";
const TOTAL_COUNT: &str = "total_count";
const RAW: &str = "raw";
const DISPLAYED: &str = "displayed";

fn key(dashboard_id: &str, part: &str) -> String {
    format!("{dashboard_id}.{part}")
}

fn criterion_key(dashboard_id: &str, dimension: Dimension) -> String {
    format!("{dashboard_id}.criteria.{dimension}")
}

/// Write every part of `snapshot`. Unset parts remove their key.
pub fn save<S: StateStore + ?Sized>(store: &mut S, dashboard_id: &str, snapshot: &ViewSnapshot) {
    write_part(store, &key(dashboard_id, SEARCH), Some(&snapshot.search));
    for dimension in Dimension::ALL {
        write_part(
            store,
            &criterion_key(dashboard_id, dimension),
            snapshot.criteria.get(dimension),
        );
    }
    write_part(store, &key(dashboard_id, SORT), snapshot.sort.as_ref());
    write_part(store, &key(dashboard_id, PAGE), Some(&snapshot.page));
    write_part(
        store,
        &key(dashboard_id, TOTAL_COUNT),
        snapshot.total_count.as_ref(),
    );
    write_part(store, &key(dashboard_id, RAW), snapshot.raw.as_ref());
    write_part(store, &key(dashboard_id, DISPLAYED), snapshot.displayed.as_ref());
    tracing::debug!("state: saved {dashboard_id} at page {}", snapshot.page);
}

/// Read the last snapshot, defaulting every absent or malformed part.
pub fn load<S: StateStore + ?Sized>(store: &S, dashboard_id: &str) -> ViewSnapshot {
    let mut criteria = Criteria::default();
    for dimension in Dimension::ALL {
        if let Some(value) = read_part::<String, _>(store, &criterion_key(dashboard_id, dimension))
        {
            criteria.set(dimension, &value);
        }
    }

    ViewSnapshot {
        search: read_part(store, &key(dashboard_id, SEARCH)).unwrap_or_default(),
        criteria,
        sort: read_part::<SortSpec, _>(store, &key(dashboard_id, SORT)),
        page: read_part::<u32, _>(store, &key(dashboard_id, PAGE))
            .filter(|&p| p >= 1)
            .unwrap_or(1),
        total_count: read_part(store, &key(dashboard_id, TOTAL_COUNT)),
        raw: read_part::<Vec<Record>, _>(store, &key(dashboard_id, RAW)),
        displayed: read_part::<Vec<Record>, _>(store, &key(dashboard_id, DISPLAYED)),
    }
}

/// Forget everything stored for one dashboard.
pub fn clear<S: StateStore + ?Sized>(store: &mut S, dashboard_id: &str) {
    store.remove_prefix(&format!("{dashboard_id}."));
}

fn write_part<S, T>(store: &mut S, key: &str, value: Option<&T>)
where
    S: StateStore + ?Sized,
    T: Serialize + ?Sized,
{
    let Some(value) = value else {
        store.remove(key);
        return;
    };
    match serde_json::to_string(value) {
        Ok(json) => store.set(key, json),
        Err(e) => tracing::warn!("state: cannot encode {key}: {e}"),
    }
}

fn read_part<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: StateStore + ?Sized,
{
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(source) => {
            let err = Error::MalformedState {
                key: key.to_owned(),
                source,
            };
            tracing::warn!("state: {:#}, using default", anyhow::Error::from(err));
            None
        }
    }
}
