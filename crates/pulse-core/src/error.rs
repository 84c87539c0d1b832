//! Error types for `pulse-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("quarter {0} is outside 1..=4")]
  QuarterOutOfRange(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
