//! Partition discovery over a dataset root.
//!
//! Discovery only looks at names: it never opens a document. Parsing happens
//! afterwards, one [`Partition`] at a time.

use std::{
  fs,
  path::{Path, PathBuf},
};

use pulse_core::period::{Period, Region};
use tracing::debug;

use crate::{Error, Result};

const DOCUMENT_EXTENSION: &str = "json";

// ─── Layout ──────────────────────────────────────────────────────────────────

/// The two datasets shipped in an aggregated export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
  Transaction,
  User,
}

impl Dataset {
  fn dir_name(self) -> &'static str {
    match self {
      Dataset::Transaction => "transaction",
      Dataset::User => "user",
    }
  }
}

/// Where an export lives on disk, and which region to read from it.
#[derive(Debug, Clone)]
pub struct SourceLayout {
  /// Directory containing `aggregated/`.
  pub root:   PathBuf,
  pub region: Region,
}

impl SourceLayout {
  pub fn new(root: impl Into<PathBuf>, region: Region) -> Self {
    Self { root: root.into(), region }
  }

  /// `<root>/aggregated/<dataset>/country/<region>`, the directory whose
  /// children are year directories.
  pub fn dataset_root(&self, dataset: Dataset) -> PathBuf {
    self
      .root
      .join("aggregated")
      .join(dataset.dir_name())
      .join("country")
      .join(&self.region.slug)
  }
}

// ─── Discovery ───────────────────────────────────────────────────────────────

/// One `<year>/<quarter>.json` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
  pub period: Period,
  pub path:   PathBuf,
}

/// List every partition under `root`, sorted by period.
///
/// Non-directory entries directly under `root` and non-`.json` files inside a
/// year directory are skipped. A year directory or a `.json` stem that does
/// not parse as an integer is an error, as is a quarter outside `1..=4`.
pub fn discover_partitions(root: &Path) -> Result<Vec<Partition>> {
  let mut partitions = Vec::new();

  for year_dir in read_dir_sorted(root)? {
    if !year_dir.is_dir() {
      debug!(path = %year_dir.display(), "skipping non-directory entry");
      continue;
    }
    let year = parse_year(&year_dir)?;

    for file in read_dir_sorted(&year_dir)? {
      if !is_document(&file) {
        debug!(path = %file.display(), "skipping non-json entry");
        continue;
      }
      let period = parse_period(&file, year)?;
      partitions.push(Partition { period, path: file });
    }
  }

  partitions.sort_by_key(|p| p.period);
  Ok(partitions)
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
  let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
  let mut paths = entries
    .map(|entry| entry.map(|e| e.path()))
    .collect::<std::io::Result<Vec<_>>>()
    .map_err(|e| Error::io(dir, e))?;
  paths.sort();
  Ok(paths)
}

fn is_document(path: &Path) -> bool {
  path.is_file()
    && path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION)
}

fn parse_year(dir: &Path) -> Result<i32> {
  dir
    .file_name()
    .and_then(|n| n.to_str())
    .and_then(|n| n.parse().ok())
    .ok_or_else(|| Error::InvalidYear { path: dir.to_path_buf() })
}

fn parse_period(file: &Path, year: i32) -> Result<Period> {
  let quarter: u8 = file
    .file_stem()
    .and_then(|s| s.to_str())
    .and_then(|s| s.parse().ok())
    .ok_or_else(|| Error::InvalidQuarter { path: file.to_path_buf(), year })?;

  Period::new(year, quarter).map_err(|source| Error::Period {
    path: file.to_path_buf(),
    year,
    source,
  })
}
