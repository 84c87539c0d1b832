//! Integration tests for `SqliteStore` against an in-memory database.

use pulse_core::{
  fact::{DeviceUsageFact, TransactionFact, UserSummaryFact},
  finding::{Finding, FindingReport, TableCounts},
  period::Period,
  store::FactStore,
};
use strum::IntoEnumIterator;

use crate::SqliteStore;

fn store() -> SqliteStore { SqliteStore::open_in_memory().expect("in-memory store") }

fn period(year: i32, quarter: u8) -> Period { Period::new(year, quarter).unwrap() }

fn txn(year: i32, quarter: u8, kind: &str, count: i64, amount: f64) -> TransactionFact {
  TransactionFact {
    region: "India".into(),
    period: period(year, quarter),
    transaction_type: kind.into(),
    count,
    amount,
  }
}

fn summary(year: i32, quarter: u8, registered: i64, opens: i64) -> UserSummaryFact {
  UserSummaryFact {
    region:           "India".into(),
    period:           period(year, quarter),
    registered_users: registered,
    app_opens:        opens,
  }
}

fn device(year: i32, quarter: u8, brand: &str, users: i64) -> DeviceUsageFact {
  DeviceUsageFact {
    region:     "India".into(),
    period:     period(year, quarter),
    brand:      brand.into(),
    user_count: users,
    percentage: 0.1,
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[test]
fn ensure_schema_is_idempotent() {
  let mut s = store();
  s.append_transactions(&[txn(2022, 1, "Merchant payments", 1, 2.0)])
    .unwrap();

  s.ensure_schema().unwrap();
  s.ensure_schema().unwrap();

  let tables: Vec<String> = s
    .conn
    .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
    .unwrap()
    .query_map([], |r| r.get(0))
    .unwrap()
    .collect::<rusqlite::Result<_>>()
    .unwrap();
  assert_eq!(tables, vec![
    "aggregated_transaction",
    "aggregated_user_by_device",
    "aggregated_user_summary",
  ]);
  assert_eq!(s.table_counts().unwrap().transactions, 1);
}

#[test]
fn reopening_a_file_keeps_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("pulse.db");

  {
    let mut s = SqliteStore::open(&path).unwrap();
    s.append_user_facts(&[summary(2022, 1, 10, 20)], &[]).unwrap();
  }

  let s = SqliteStore::open(&path).unwrap();
  assert_eq!(s.table_counts().unwrap(), TableCounts {
    transactions:   0,
    user_summaries: 1,
    device_usage:   0,
  });
}

// ─── Writes ──────────────────────────────────────────────────────────────────

#[test]
fn appends_accumulate_duplicates() {
  let mut s = store();
  let rows = [txn(2022, 1, "Recharge & bill payments", 5, 50.0)];

  assert_eq!(s.append_transactions(&rows).unwrap(), 1);
  assert_eq!(s.append_transactions(&rows).unwrap(), 1);

  assert_eq!(s.table_counts().unwrap().transactions, 2);
  let volume = s.transaction_volume().unwrap();
  assert_eq!(volume[0].txn_count, 10);
}

#[test]
fn append_user_facts_writes_both_tables() {
  let mut s = store();
  let written = s
    .append_user_facts(&[summary(2022, 1, 100, 200)], &[
      device(2022, 1, "Xiaomi", 40),
      device(2022, 1, "Samsung", 30),
    ])
    .unwrap();

  assert_eq!(written, 3);
  let counts = s.table_counts().unwrap();
  assert_eq!(counts.user_summaries, 1);
  assert_eq!(counts.device_usage, 2);
}

#[test]
fn reset_empties_every_table() {
  let mut s = store();
  s.append_transactions(&[txn(2022, 1, "Peer-to-peer payments", 1, 1.0)])
    .unwrap();
  s.append_user_facts(&[summary(2022, 1, 1, 1)], &[device(2022, 1, "Vivo", 1)])
    .unwrap();

  s.reset().unwrap();

  assert_eq!(s.table_counts().unwrap(), TableCounts::default());
}

// ─── Findings ────────────────────────────────────────────────────────────────

#[test]
fn every_finding_is_empty_on_an_empty_store() {
  let s = store();
  for finding in Finding::iter() {
    let report = s.run_finding(finding).unwrap();
    assert_eq!(report.finding(), finding);
    assert!(report.is_empty(), "{finding} should be empty");
  }
}

#[test]
fn top_transaction_types_keeps_top_five_descending() {
  let mut s = store();
  let rows: Vec<_> = ["a", "b", "c", "d", "e", "f"]
    .iter()
    .enumerate()
    .map(|(i, kind)| txn(2022, 1, kind, 1, 600.0 - 100.0 * i as f64))
    .collect();
  s.append_transactions(&rows).unwrap();

  let top = s.top_transaction_types().unwrap();
  let kinds: Vec<_> = top.iter().map(|r| r.transaction_type.as_str()).collect();
  assert_eq!(kinds, ["a", "b", "c", "d", "e"]);
  assert_eq!(top[0].total_amt, 600.0);
  assert_eq!(top[4].total_amt, 200.0);
}

#[test]
fn top_transaction_types_sums_across_periods() {
  let mut s = store();
  s.append_transactions(&[
    txn(2021, 4, "Financial Services", 1, 10.0),
    txn(2022, 1, "Financial Services", 1, 15.0),
    txn(2022, 1, "Others", 1, 20.0),
  ])
  .unwrap();

  let top = s.top_transaction_types().unwrap();
  assert_eq!(top[0].transaction_type, "Financial Services");
  assert_eq!(top[0].total_amt, 25.0);
  assert_eq!(top[1].transaction_type, "Others");
}

#[test]
fn period_findings_are_chronological() {
  let mut s = store();
  s.append_transactions(&[
    txn(2023, 4, "x", 3, 30.0),
    txn(2022, 1, "x", 1, 10.0),
    txn(2023, 1, "x", 2, 20.0),
  ])
  .unwrap();
  s.append_user_facts(
    &[
      summary(2023, 4, 30, 300),
      summary(2022, 1, 10, 100),
      summary(2023, 1, 20, 200),
    ],
    &[],
  )
  .unwrap();

  let expected = [(2022, 1), (2023, 1), (2023, 4)];

  let volume: Vec<_> = s
    .transaction_volume()
    .unwrap()
    .into_iter()
    .map(|r| (r.year, r.quarter))
    .collect();
  assert_eq!(volume, expected);

  let opens = s.app_opens().unwrap();
  let keys: Vec<_> = opens.iter().map(|r| (r.year, r.quarter)).collect();
  assert_eq!(keys, expected);
  assert_eq!(opens[2].total_opens, 300);

  let users = s.registered_users().unwrap();
  let keys: Vec<_> = users.iter().map(|r| (r.year, r.quarter)).collect();
  assert_eq!(keys, expected);
  assert_eq!(users[0].users, 10);
}

#[test]
fn average_amount_is_ratio_of_sums() {
  let mut s = store();
  s.append_transactions(&[
    txn(2022, 2, "a", 10, 100.0),
    txn(2022, 2, "b", 20, 200.0),
    txn(2022, 2, "c", 30, 300.0),
  ])
  .unwrap();

  let avg = s.average_transaction_amount().unwrap();
  assert_eq!(avg.len(), 1);
  assert_eq!((avg[0].year, avg[0].quarter), (2022, 2));
  assert_eq!(avg[0].avg_txn_amt, Some(10.0));
}

#[test]
fn average_amount_with_zero_count_is_null() {
  let mut s = store();
  s.append_transactions(&[
    txn(2022, 1, "a", 0, 0.0),
    txn(2022, 2, "a", 4, 10.0),
  ])
  .unwrap();

  let avg = s.average_transaction_amount().unwrap();
  assert_eq!(avg.len(), 2);
  assert_eq!(avg[0].avg_txn_amt, None);
  assert_eq!(avg[1].avg_txn_amt, Some(2.5));
}

#[test]
fn top_devices_keeps_top_five_descending() {
  let mut s = store();
  let devices: Vec<_> = ["Xiaomi", "Samsung", "Vivo", "Oppo", "Realme", "Apple"]
    .iter()
    .enumerate()
    .map(|(i, brand)| device(2022, 1, brand, 60 - 10 * i as i64))
    .collect();
  s.append_user_facts(&[summary(2022, 1, 0, 0)], &devices).unwrap();

  let top = s.top_devices().unwrap();
  let brands: Vec<_> = top.iter().map(|r| r.brand.as_str()).collect();
  assert_eq!(brands, ["Xiaomi", "Samsung", "Vivo", "Oppo", "Realme"]);
  assert_eq!(top[0].total_users, 60);
}

#[test]
fn yearly_volume_is_busiest_first() {
  let mut s = store();
  s.append_transactions(&[
    txn(2020, 1, "a", 5, 1.0),
    txn(2021, 1, "a", 50, 1.0),
    txn(2021, 2, "a", 50, 1.0),
    txn(2022, 1, "a", 70, 1.0),
  ])
  .unwrap();

  let years: Vec<_> = s
    .yearly_volume()
    .unwrap()
    .into_iter()
    .map(|r| (r.year, r.txn_count))
    .collect();
  assert_eq!(years, [(2021, 100), (2022, 70), (2020, 5)]);
}

#[test]
fn quarterly_app_opens_sums_across_years() {
  let mut s = store();
  s.append_user_facts(
    &[
      summary(2021, 1, 0, 10),
      summary(2022, 1, 0, 10),
      summary(2021, 4, 0, 15),
      summary(2022, 3, 0, 1),
    ],
    &[],
  )
  .unwrap();

  let quarters: Vec<_> = s
    .quarterly_app_opens()
    .unwrap()
    .into_iter()
    .map(|r| (r.quarter, r.total_opens))
    .collect();
  assert_eq!(quarters, [(1, 20), (4, 15), (3, 1)]);
}

#[test]
fn run_finding_dispatches_to_the_matching_query() {
  let mut s = store();
  s.append_user_facts(&[summary(2022, 1, 7, 9)], &[]).unwrap();

  let report = s.run_finding(Finding::RegisteredUsers).unwrap();
  let FindingReport::RegisteredUsers(rows) = report else {
    panic!("wrong report variant");
  };
  assert_eq!(rows[0].users, 7);
}
