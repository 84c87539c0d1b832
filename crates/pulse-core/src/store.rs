//! The `FactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `pulse-store-sqlite`).
//! The loader in `pulse-ingest` and the `pulse` binary depend on this
//! abstraction, not on any concrete backend.

use crate::{
  fact::{DeviceUsageFact, TransactionFact, UserSummaryFact},
  finding::{
    DeviceBrandTotal, Finding, FindingReport, PeriodAppOpens, PeriodAverageAmount,
    PeriodRegisteredUsers, PeriodTransactionCount, QuarterAppOpens, TableCounts,
    TransactionTypeTotal, YearTransactionCount,
  },
};

/// Abstraction over a relational store holding the three fact tables.
///
/// Writes are append-only. Each append call is atomic: either every row it
/// was given becomes visible, or none do. The store is owned by one caller at
/// a time; appends take `&mut self`, reads take `&self`.
pub trait FactStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create the three fact tables if they do not exist. Calling this on an
  /// initialised store changes nothing.
  fn ensure_schema(&self) -> Result<(), Self::Error>;

  /// Delete every row from every fact table, atomically.
  fn reset(&mut self) -> Result<(), Self::Error>;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Append transaction facts in one commit. Returns the number of rows
  /// written.
  fn append_transactions(
    &mut self,
    facts: &[TransactionFact],
  ) -> Result<usize, Self::Error>;

  /// Append user summaries and device breakdowns together in one commit.
  /// Returns the number of rows written across both tables.
  fn append_user_facts(
    &mut self,
    summaries: &[UserSummaryFact],
    devices: &[DeviceUsageFact],
  ) -> Result<usize, Self::Error>;

  // ── Reads ─────────────────────────────────────────────────────────────

  fn table_counts(&self) -> Result<TableCounts, Self::Error>;

  /// Top transaction types by total amount, descending.
  fn top_transaction_types(
    &self,
  ) -> Result<Vec<TransactionTypeTotal>, Self::Error>;

  /// Total transaction count per period, in calendar order.
  fn transaction_volume(
    &self,
  ) -> Result<Vec<PeriodTransactionCount>, Self::Error>;

  /// Total app opens per period, in calendar order.
  fn app_opens(&self) -> Result<Vec<PeriodAppOpens>, Self::Error>;

  /// Total registered users per period, in calendar order.
  fn registered_users(&self) -> Result<Vec<PeriodRegisteredUsers>, Self::Error>;

  /// Top device brands by total user count, descending.
  fn top_devices(&self) -> Result<Vec<DeviceBrandTotal>, Self::Error>;

  /// `sum(amount) / sum(count)` per period, in calendar order.
  fn average_transaction_amount(
    &self,
  ) -> Result<Vec<PeriodAverageAmount>, Self::Error>;

  /// Total transaction count per year, busiest first.
  fn yearly_volume(&self) -> Result<Vec<YearTransactionCount>, Self::Error>;

  /// Total app opens per quarter number across all years, busiest first.
  fn quarterly_app_opens(&self) -> Result<Vec<QuarterAppOpens>, Self::Error>;

  /// Run the query behind `finding`.
  fn run_finding(&self, finding: Finding) -> Result<FindingReport, Self::Error> {
    Ok(match finding {
      Finding::TopTransactionTypes => {
        FindingReport::TopTransactionTypes(self.top_transaction_types()?)
      }
      Finding::TransactionVolume => {
        FindingReport::TransactionVolume(self.transaction_volume()?)
      }
      Finding::AppOpens => FindingReport::AppOpens(self.app_opens()?),
      Finding::RegisteredUsers => {
        FindingReport::RegisteredUsers(self.registered_users()?)
      }
      Finding::TopDevices => FindingReport::TopDevices(self.top_devices()?),
      Finding::AverageTransactionAmount => {
        FindingReport::AverageTransactionAmount(self.average_transaction_amount()?)
      }
      Finding::YearlyVolume => FindingReport::YearlyVolume(self.yearly_volume()?),
      Finding::QuarterlyAppOpens => {
        FindingReport::QuarterlyAppOpens(self.quarterly_app_opens()?)
      }
    })
  }
}
