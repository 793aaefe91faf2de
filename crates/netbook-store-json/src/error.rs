//! Error type for `netbook-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// A stored contact failed validation. `position` is 1-based, in file order.
  #[error("stored contact #{position} is invalid: {source}")]
  InvalidContact {
    position: usize,
    #[source]
    source:   netbook_core::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
