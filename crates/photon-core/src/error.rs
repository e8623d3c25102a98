//! Error types for `photon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A size or ladder input violated its contract (zero dimension, empty
  /// ladder, unordered breakpoints).
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("not found: {0}")]
  NotFound(String),

  /// A server representation broke an invariant and was not adopted.
  #[error("invalid data: {0}")]
  InvalidData(String),

  /// The remote collaborator failed; the entity keeps its pre-call state.
  #[error("remote failure: {0}")]
  Remote(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
