//! Error type for `photon-client`.

use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("{method} {path} failed: {source}")]
  Http {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{method} {path} → {status}")]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
  },

  #[error("deserialising {method} {path} response: {source}")]
  Decode {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  #[error("serialising request body: {0}")]
  Encode(#[source] serde_json::Error),
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
