//! The loader: run both extractors and commit their output.

use pulse_core::store::FactStore;
use tracing::info;

use crate::{
  Error, Result,
  extract::{transactions_from, users_from},
  partition::{Dataset, SourceLayout, discover_partitions},
};

/// What one [`load_all`] run read and wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Transaction documents read.
  pub transaction_partitions: usize,
  /// User documents read.
  pub user_partitions:        usize,
  pub transactions:           usize,
  pub user_summaries:         usize,
  pub device_usage:           usize,
}

impl LoadReport {
  /// Rows written across all three tables.
  pub fn total(&self) -> usize {
    self.transactions + self.user_summaries + self.device_usage
  }
}

/// Extract both datasets described by `layout` and append them to `store`.
///
/// Transaction facts are committed first, in one transaction; user summary
/// and device facts follow together in a second one. If the user extractor
/// fails, the transaction rows stay committed. Nothing is deduplicated:
/// loading the same export twice doubles every row unless the store is
/// [reset](FactStore::reset) in between.
pub fn load_all<S: FactStore>(store: &mut S, layout: &SourceLayout) -> Result<LoadReport> {
  let mut report = LoadReport::default();

  let partitions = discover_partitions(&layout.dataset_root(Dataset::Transaction))?;
  let transactions = transactions_from(&partitions, &layout.region)?;
  store
    .append_transactions(&transactions)
    .map_err(|e| Error::Store(Box::new(e)))?;
  report.transaction_partitions = partitions.len();
  report.transactions = transactions.len();
  info!(
    partitions = report.transaction_partitions,
    rows = report.transactions,
    "loaded transaction facts"
  );

  let partitions = discover_partitions(&layout.dataset_root(Dataset::User))?;
  let (summaries, devices) = users_from(&partitions, &layout.region)?;
  store
    .append_user_facts(&summaries, &devices)
    .map_err(|e| Error::Store(Box::new(e)))?;
  report.user_partitions = partitions.len();
  report.user_summaries = summaries.len();
  report.device_usage = devices.len();
  info!(
    partitions = report.user_partitions,
    summaries = report.user_summaries,
    devices = report.device_usage,
    "loaded user facts"
  );

  Ok(report)
}
