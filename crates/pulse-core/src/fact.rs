//! Fact types: the flattened rows produced by ingestion.
//!
//! A fact is an immutable measurement for one region and period. Facts are
//! never updated once written; a reload appends a fresh copy unless the store
//! is reset first.

use serde::{Deserialize, Serialize};

use crate::period::Period;

/// Brand recorded for device entries that do not name one.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// One payment-instrument entry of a transaction type, for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFact {
  pub region:           String,
  pub period:           Period,
  /// The `name` of the transaction-type group the instrument belongs to.
  pub transaction_type: String,
  pub count:            i64,
  pub amount:           f64,
}

/// Aggregated user totals for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummaryFact {
  pub region:           String,
  pub period:           Period,
  pub registered_users: i64,
  pub app_opens:        i64,
}

/// Users on one device brand for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceUsageFact {
  pub region:     String,
  pub period:     Period,
  pub brand:      String,
  pub user_count: i64,
  /// Share of users on this brand; nominally within `[0, 1]`.
  pub percentage: f64,
}
