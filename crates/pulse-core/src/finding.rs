//! The fixed catalog of aggregate findings and their result rows.
//!
//! Each [`Finding`] corresponds to one read-only query on a
//! [`FactStore`](crate::store::FactStore). Result rows carry the column names
//! the presentation layer charts against.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Number of groups returned by the "top" findings.
pub const TOP_N: usize = 5;

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// One of the eight catalogued findings, in presentation order.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Finding {
  TopTransactionTypes,
  TransactionVolume,
  AppOpens,
  RegisteredUsers,
  TopDevices,
  AverageTransactionAmount,
  YearlyVolume,
  QuarterlyAppOpens,
}

impl Finding {
  /// Chart title for this finding.
  pub fn title(self) -> &'static str {
    match self {
      Finding::TopTransactionTypes => "Top Transaction Types",
      Finding::TransactionVolume => "Transaction Volume Over Time",
      Finding::AppOpens => "App Opens Per Quarter",
      Finding::RegisteredUsers => "Registered Users Over Time",
      Finding::TopDevices => "Top 5 Devices Used",
      Finding::AverageTransactionAmount => "Average Transaction Amount Over Time",
      Finding::YearlyVolume => "Most Active Transaction Years",
      Finding::QuarterlyAppOpens => "Most Popular Quarters for App Opens",
    }
  }

  /// Stable kebab-case identifier, as accepted by `FromStr`.
  pub fn slug(self) -> &'static str { self.into() }
}

// ─── Result rows ─────────────────────────────────────────────────────────────

/// Row of [`Finding::TopTransactionTypes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTypeTotal {
  pub transaction_type: String,
  pub total_amt:        f64,
}

/// Row of [`Finding::TransactionVolume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTransactionCount {
  pub year:      i32,
  pub quarter:   u8,
  pub txn_count: i64,
}

/// Row of [`Finding::AppOpens`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAppOpens {
  pub year:        i32,
  pub quarter:     u8,
  pub total_opens: i64,
}

/// Row of [`Finding::RegisteredUsers`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRegisteredUsers {
  pub year:    i32,
  pub quarter: u8,
  pub users:   i64,
}

/// Row of [`Finding::TopDevices`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBrandTotal {
  pub brand:       String,
  pub total_users: i64,
}

/// Row of [`Finding::AverageTransactionAmount`].
///
/// `avg_txn_amt` is `None` when the period's total count is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodAverageAmount {
  pub year:        i32,
  pub quarter:     u8,
  pub avg_txn_amt: Option<f64>,
}

/// Row of [`Finding::YearlyVolume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTransactionCount {
  pub year:      i32,
  pub txn_count: i64,
}

/// Row of [`Finding::QuarterlyAppOpens`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterAppOpens {
  pub quarter:     u8,
  pub total_opens: i64,
}

// ─── Report ──────────────────────────────────────────────────────────────────

/// The result set of any one finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "finding", content = "rows", rename_all = "kebab-case")]
pub enum FindingReport {
  TopTransactionTypes(Vec<TransactionTypeTotal>),
  TransactionVolume(Vec<PeriodTransactionCount>),
  AppOpens(Vec<PeriodAppOpens>),
  RegisteredUsers(Vec<PeriodRegisteredUsers>),
  TopDevices(Vec<DeviceBrandTotal>),
  AverageTransactionAmount(Vec<PeriodAverageAmount>),
  YearlyVolume(Vec<YearTransactionCount>),
  QuarterlyAppOpens(Vec<QuarterAppOpens>),
}

impl FindingReport {
  pub fn finding(&self) -> Finding {
    match self {
      FindingReport::TopTransactionTypes(_) => Finding::TopTransactionTypes,
      FindingReport::TransactionVolume(_) => Finding::TransactionVolume,
      FindingReport::AppOpens(_) => Finding::AppOpens,
      FindingReport::RegisteredUsers(_) => Finding::RegisteredUsers,
      FindingReport::TopDevices(_) => Finding::TopDevices,
      FindingReport::AverageTransactionAmount(_) => {
        Finding::AverageTransactionAmount
      }
      FindingReport::YearlyVolume(_) => Finding::YearlyVolume,
      FindingReport::QuarterlyAppOpens(_) => Finding::QuarterlyAppOpens,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      FindingReport::TopTransactionTypes(rows) => rows.len(),
      FindingReport::TransactionVolume(rows) => rows.len(),
      FindingReport::AppOpens(rows) => rows.len(),
      FindingReport::RegisteredUsers(rows) => rows.len(),
      FindingReport::TopDevices(rows) => rows.len(),
      FindingReport::AverageTransactionAmount(rows) => rows.len(),
      FindingReport::YearlyVolume(rows) => rows.len(),
      FindingReport::QuarterlyAppOpens(rows) => rows.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// ─── Table counts ────────────────────────────────────────────────────────────

/// Row counts of the three fact tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
  pub transactions:   u64,
  pub user_summaries: u64,
  pub device_usage:   u64,
}
