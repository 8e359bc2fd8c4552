// backend module: HTTP access to the dashboard API

mod client;
mod types;

pub use client::BackendClient;
pub use types::{FetchedRecords, SourceQuery};
