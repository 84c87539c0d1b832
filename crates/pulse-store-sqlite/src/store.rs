//! [`SqliteStore`], the SQLite implementation of [`FactStore`].

use std::path::Path;

use pulse_core::{
  fact::{DeviceUsageFact, TransactionFact, UserSummaryFact},
  finding::{
    DeviceBrandTotal, PeriodAppOpens, PeriodAverageAmount, PeriodRegisteredUsers,
    PeriodTransactionCount, QuarterAppOpens, TOP_N, TableCounts,
    TransactionTypeTotal, YearTransactionCount,
  },
  store::FactStore,
};
use rusqlite::{Connection, Params, Row};
use tracing::{debug, info};

use crate::{
  Result,
  query::{
    APP_OPENS, AVERAGE_TRANSACTION_AMOUNT, INSERT_DEVICE_USAGE, INSERT_TRANSACTION,
    INSERT_USER_SUMMARY, QUARTERLY_APP_OPENS, REGISTERED_USERS, TOP_DEVICES,
    TOP_TRANSACTION_TYPES, TRANSACTION_VOLUME, YEARLY_VOLUME,
  },
  schema::{RESET, SCHEMA, TABLES},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pulse fact store backed by a single SQLite file.
///
/// The connection is owned; dropping the store closes it.
pub struct SqliteStore {
  pub(crate) conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and ensure the schema exists.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let store = Self { conn: Connection::open(path)? };
    store.ensure_schema()?;
    info!(path = %path.display(), "opened fact store");
    Ok(store)
  }

  /// Open an in-memory store.
  pub fn open_in_memory() -> Result<Self> {
    let store = Self { conn: Connection::open_in_memory()? };
    store.ensure_schema()?;
    Ok(store)
  }

  /// Run `sql` and map every row with `map`.
  fn query_rows<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>>
  where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
  {
    let mut stmt = self.conn.prepare_cached(sql)?;
    let rows = stmt
      .query_map(params, map)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
  }

  fn top_n() -> i64 { TOP_N as i64 }
}

// ─── FactStore impl ──────────────────────────────────────────────────────────

impl FactStore for SqliteStore {
  type Error = crate::Error;

  // ── Schema ────────────────────────────────────────────────────────────────

  fn ensure_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  fn reset(&mut self) -> Result<()> {
    let tx = self.conn.transaction()?;
    tx.execute_batch(RESET)?;
    tx.commit()?;
    info!("reset fact tables");
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  fn append_transactions(&mut self, facts: &[TransactionFact]) -> Result<usize> {
    let tx = self.conn.transaction()?;
    {
      let mut stmt = tx.prepare_cached(INSERT_TRANSACTION)?;
      for f in facts {
        stmt.execute(rusqlite::params![
          f.region,
          f.period.year,
          f.period.quarter,
          f.transaction_type,
          f.count,
          f.amount,
        ])?;
      }
    }
    tx.commit()?;

    debug!(rows = facts.len(), "committed transaction facts");
    Ok(facts.len())
  }

  fn append_user_facts(
    &mut self,
    summaries: &[UserSummaryFact],
    devices:   &[DeviceUsageFact],
  ) -> Result<usize> {
    let tx = self.conn.transaction()?;
    {
      let mut stmt = tx.prepare_cached(INSERT_USER_SUMMARY)?;
      for s in summaries {
        stmt.execute(rusqlite::params![
          s.region,
          s.period.year,
          s.period.quarter,
          s.registered_users,
          s.app_opens,
        ])?;
      }

      let mut stmt = tx.prepare_cached(INSERT_DEVICE_USAGE)?;
      for d in devices {
        stmt.execute(rusqlite::params![
          d.region,
          d.period.year,
          d.period.quarter,
          d.brand,
          d.user_count,
          d.percentage,
        ])?;
      }
    }
    tx.commit()?;

    debug!(
      summaries = summaries.len(),
      devices = devices.len(),
      "committed user facts"
    );
    Ok(summaries.len() + devices.len())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  fn table_counts(&self) -> Result<TableCounts> {
    let [transactions, user_summaries, device_usage] = TABLES.map(|table| {
      self
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| {
          r.get::<_, i64>(0)
        })
        .map(|n| n as u64)
    });

    Ok(TableCounts {
      transactions:   transactions?,
      user_summaries: user_summaries?,
      device_usage:   device_usage?,
    })
  }

  fn top_transaction_types(&self) -> Result<Vec<TransactionTypeTotal>> {
    self.query_rows(TOP_TRANSACTION_TYPES, [Self::top_n()], |row| {
      Ok(TransactionTypeTotal {
        transaction_type: row.get(0)?,
        total_amt:        row.get(1)?,
      })
    })
  }

  fn transaction_volume(&self) -> Result<Vec<PeriodTransactionCount>> {
    self.query_rows(TRANSACTION_VOLUME, [], |row| {
      Ok(PeriodTransactionCount {
        year:      row.get(0)?,
        quarter:   row.get(1)?,
        txn_count: row.get(2)?,
      })
    })
  }

  fn app_opens(&self) -> Result<Vec<PeriodAppOpens>> {
    self.query_rows(APP_OPENS, [], |row| {
      Ok(PeriodAppOpens {
        year:        row.get(0)?,
        quarter:     row.get(1)?,
        total_opens: row.get(2)?,
      })
    })
  }

  fn registered_users(&self) -> Result<Vec<PeriodRegisteredUsers>> {
    self.query_rows(REGISTERED_USERS, [], |row| {
      Ok(PeriodRegisteredUsers {
        year:    row.get(0)?,
        quarter: row.get(1)?,
        users:   row.get(2)?,
      })
    })
  }

  fn top_devices(&self) -> Result<Vec<DeviceBrandTotal>> {
    self.query_rows(TOP_DEVICES, [Self::top_n()], |row| {
      Ok(DeviceBrandTotal {
        brand:       row.get(0)?,
        total_users: row.get(1)?,
      })
    })
  }

  fn average_transaction_amount(&self) -> Result<Vec<PeriodAverageAmount>> {
    self.query_rows(AVERAGE_TRANSACTION_AMOUNT, [], |row| {
      Ok(PeriodAverageAmount {
        year:        row.get(0)?,
        quarter:     row.get(1)?,
        avg_txn_amt: row.get(2)?,
      })
    })
  }

  fn yearly_volume(&self) -> Result<Vec<YearTransactionCount>> {
    self.query_rows(YEARLY_VOLUME, [], |row| {
      Ok(YearTransactionCount {
        year:      row.get(0)?,
        txn_count: row.get(1)?,
      })
    })
  }

  fn quarterly_app_opens(&self) -> Result<Vec<QuarterAppOpens>> {
    self.query_rows(QUARTERLY_APP_OPENS, [], |row| {
      Ok(QuarterAppOpens {
        quarter:     row.get(0)?,
        total_opens: row.get(1)?,
      })
    })
  }
}
