use http::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures the library recovers from locally.
///
/// Everything except `MalformedState` is a network failure: the caller shows
/// an empty result set and the user retries by editing criteria.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {path} failed")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: StatusCode },

    #[error("could not decode the response from {path}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed persisted value under \"{key}\"")]
    MalformedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn is_network_failure(&self) -> bool {
        !matches!(self, Self::MalformedState { .. })
    }
}
