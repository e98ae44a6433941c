//! Error type for `pbl-import`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("record #{index}: {source}")]
  Record {
    index:  usize,
    #[source]
    source: pbl_core::Error,
  },

  #[error("authority table: {0}")]
  Authority(#[from] pbl_core::Error),

  #[error("xml error: {0}")]
  Xml(#[from] pbl_xml::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
