//! Error type for `pulse-ingest`.
//!
//! Every variant raised while reading the source tree names the offending
//! path, and the partition coordinates once they are known.

use std::path::PathBuf;

use pulse_core::period::Period;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot read {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot read {} ({period}): {source}", path.display())]
  Read {
    path:   PathBuf,
    period: Period,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed document {} ({period}): {source}", path.display())]
  Json {
    path:   PathBuf,
    period: Period,
    #[source]
    source: serde_json::Error,
  },

  #[error("year directory name is not an integer: {}", path.display())]
  InvalidYear { path: PathBuf },

  #[error("quarter file name is not an integer: {} (year {year})", path.display())]
  InvalidQuarter { path: PathBuf, year: i32 },

  #[error("invalid partition {} (year {year}): {source}", path.display())]
  Period {
    path:   PathBuf,
    year:   i32,
    #[source]
    source: pulse_core::Error,
  },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Error::Io { path: path.into(), source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
