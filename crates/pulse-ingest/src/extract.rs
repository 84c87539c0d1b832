//! Record extractors: one dataset root in, flattened facts out.
//!
//! Extractors are pure transforms over the files on disk. They stop at the
//! first unreadable or undecodable document; nothing partial is returned.

use std::path::Path;

use pulse_core::{
  fact::{DeviceUsageFact, TransactionFact, UserSummaryFact},
  period::Region,
};
use tracing::debug;

use crate::{
  Result,
  document::{TransactionDocument, UserDocument, read_document},
  partition::{Partition, discover_partitions},
};

/// Flatten every transaction document under `root` into facts.
///
/// `root` is the directory holding the year directories, e.g.
/// `aggregated/transaction/country/india`.
pub fn extract_transactions(
  root: &Path,
  region: &Region,
) -> Result<Vec<TransactionFact>> {
  transactions_from(&discover_partitions(root)?, region)
}

/// Flatten every user document under `root` into one summary per file plus
/// its device breakdown.
pub fn extract_users(
  root: &Path,
  region: &Region,
) -> Result<(Vec<UserSummaryFact>, Vec<DeviceUsageFact>)> {
  users_from(&discover_partitions(root)?, region)
}

pub(crate) fn transactions_from(
  partitions: &[Partition],
  region: &Region,
) -> Result<Vec<TransactionFact>> {
  let mut facts = Vec::new();

  for partition in partitions {
    let doc: TransactionDocument = read_document(partition)?;
    let rows = doc.into_facts(&region.label, partition.period);
    debug!(
      period = %partition.period,
      path = %partition.path.display(),
      rows = rows.len(),
      "extracted transactions"
    );
    facts.extend(rows);
  }

  Ok(facts)
}

pub(crate) fn users_from(
  partitions: &[Partition],
  region: &Region,
) -> Result<(Vec<UserSummaryFact>, Vec<DeviceUsageFact>)> {
  let mut summaries = Vec::new();
  let mut devices = Vec::new();

  for partition in partitions {
    let doc: UserDocument = read_document(partition)?;
    let (summary, rows) = doc.into_facts(&region.label, partition.period);
    debug!(
      period = %partition.period,
      path = %partition.path.display(),
      devices = rows.len(),
      "extracted users"
    );
    summaries.push(summary);
    devices.extend(rows);
  }

  Ok((summaries, devices))
}
