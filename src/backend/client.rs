use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::RefKind;

use super::types::{
    FetchedRecords, ItemsResponse, PeopleResponse, ReposByTagResponse, ReposResponse,
    SourceQuery, TagsResponse,
};

/// Thin JSON client for the dashboard backend.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("release-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("backend: GET {path} {params:?}");
        let response = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| Error::Transport {
                path: path.to_owned(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                path: path.to_owned(),
                status,
            });
        }

        response.json::<T>().await.map_err(|source| Error::Decode {
            path: path.to_owned(),
            source,
        })
    }

    /// Fetch one reference list.
    pub async fn reference_list(&self, kind: RefKind) -> Result<Vec<String>> {
        match kind {
            RefKind::Users => Ok(self.get_json::<PeopleResponse>("/people", &[]).await?.people),
            RefKind::Repos => Ok(self.get_json::<ReposResponse>("/repos", &[]).await?.repos),
            RefKind::Tags => Ok(self.get_json::<TagsResponse>("/all-tags", &[]).await?.tags),
        }
    }

    /// Run one record query.
    pub async fn fetch(&self, query: &SourceQuery) -> Result<FetchedRecords> {
        let path = query.path();
        let params = query.params();
        match query {
            SourceQuery::ReposByTag { .. } => {
                let body: ReposByTagResponse = self.get_json(&path, &params).await?;
                Ok(FetchedRecords {
                    total_count: Some(body.repos.len() as u64),
                    records: body.repos,
                    page: None,
                })
            }
            SourceQuery::UserReleases { .. } => {
                let body: ItemsResponse = self.get_json(&path, &params).await?;
                Ok(FetchedRecords {
                    total_count: body.total_count,
                    records: body.items,
                    page: None,
                })
            }
            SourceQuery::AllPrs { .. } | SourceQuery::CategoryPrs { .. } => {
                let body: ItemsResponse = self.get_json(&path, &params).await?;
                Ok(FetchedRecords {
                    records: body.items,
                    total_count: Some(body.total_count.unwrap_or(0)),
                    page: body.page.or(query.page()),
                })
            }
        }
    }
}
