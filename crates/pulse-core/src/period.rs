//! Partition coordinates: the reporting period and the region a fact belongs
//! to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Period ──────────────────────────────────────────────────────────────────

/// A calendar quarter of a given year.
///
/// Field order matters: the derived `Ord` compares `year` first, then
/// `quarter`, which is calendar order.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
  pub year:    i32,
  pub quarter: u8,
}

impl Period {
  pub const QUARTERS: std::ops::RangeInclusive<u8> = 1..=4;

  /// Build a period, rejecting quarters outside `1..=4`.
  pub fn new(year: i32, quarter: u8) -> Result<Self> {
    if !Self::QUARTERS.contains(&quarter) {
      return Err(Error::QuarterOutOfRange(quarter));
    }
    Ok(Self { year, quarter })
  }
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} Q{}", self.year, self.quarter)
  }
}

// ─── Region ──────────────────────────────────────────────────────────────────

/// The geographic scope of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
  /// Directory segment under `country/` in the source tree.
  pub slug:  String,
  /// Value written to the `region` column of every fact.
  pub label: String,
}

impl Region {
  pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
    Self { slug: slug.into(), label: label.into() }
  }
}

impl Default for Region {
  fn default() -> Self { Self::new("india", "India") }
}
