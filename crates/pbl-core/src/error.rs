//! Error types for `pbl-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid authority code: {0:?}")]
  InvalidCode(String),

  #[error("invalid journal item input: {0}")]
  Input(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
