use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::{
  Error,
  finding::{Finding, FindingReport, PeriodAverageAmount},
  period::{Period, Region},
};

// ─── Period ──────────────────────────────────────────────────────────────────

#[test]
fn period_rejects_out_of_range_quarters() {
  assert!(matches!(Period::new(2022, 0), Err(Error::QuarterOutOfRange(0))));
  assert!(matches!(Period::new(2022, 5), Err(Error::QuarterOutOfRange(5))));
  assert!(Period::new(2022, 4).is_ok());
}

#[test]
fn periods_sort_chronologically() {
  let mut periods = vec![
    Period::new(2023, 4).unwrap(),
    Period::new(2022, 1).unwrap(),
    Period::new(2023, 1).unwrap(),
  ];
  periods.sort();

  assert_eq!(periods, vec![
    Period::new(2022, 1).unwrap(),
    Period::new(2023, 1).unwrap(),
    Period::new(2023, 4).unwrap(),
  ]);
}

#[test]
fn period_display() {
  assert_eq!(Period::new(2021, 3).unwrap().to_string(), "2021 Q3");
}

#[test]
fn default_region_is_india() {
  let region = Region::default();
  assert_eq!(region.slug, "india");
  assert_eq!(region.label, "India");
}

// ─── Finding catalog ─────────────────────────────────────────────────────────

#[test]
fn catalog_has_eight_findings_in_order() {
  let all: Vec<Finding> = Finding::iter().collect();
  assert_eq!(all.len(), 8);
  assert_eq!(all[0], Finding::TopTransactionTypes);
  assert_eq!(all[7], Finding::QuarterlyAppOpens);
}

#[test]
fn finding_slugs_parse_back() {
  for finding in Finding::iter() {
    assert_eq!(Finding::from_str(finding.slug()).unwrap(), finding);
    assert_eq!(finding.to_string(), finding.slug());
  }
  assert_eq!(
    Finding::from_str("average-transaction-amount").unwrap(),
    Finding::AverageTransactionAmount
  );
  assert!(Finding::from_str("no-such-finding").is_err());
}

#[test]
fn report_json_is_tagged_by_finding() {
  let report = FindingReport::AverageTransactionAmount(vec![
    PeriodAverageAmount { year: 2022, quarter: 1, avg_txn_amt: Some(10.0) },
    PeriodAverageAmount { year: 2022, quarter: 2, avg_txn_amt: None },
  ]);
  assert_eq!(report.finding(), Finding::AverageTransactionAmount);
  assert_eq!(report.len(), 2);

  let json = serde_json::to_value(&report).unwrap();
  assert_eq!(json["finding"], "average-transaction-amount");
  assert_eq!(json["rows"][0]["avg_txn_amt"], 10.0);
  assert!(json["rows"][1]["avg_txn_amt"].is_null());
}
