//! Plain-text rendering of finding reports.

use pulse_core::{finding::FindingReport, period::Period};

/// Label/value pairs for every row of `report`, in result order.
fn cells(report: &FindingReport) -> Vec<(String, String)> {
  let period = |year, quarter| Period { year, quarter }.to_string();

  match report {
    FindingReport::TopTransactionTypes(rows) => rows
      .iter()
      .map(|r| (r.transaction_type.clone(), format!("{:.2}", r.total_amt)))
      .collect(),
    FindingReport::TransactionVolume(rows) => rows
      .iter()
      .map(|r| (period(r.year, r.quarter), r.txn_count.to_string()))
      .collect(),
    FindingReport::AppOpens(rows) => rows
      .iter()
      .map(|r| (period(r.year, r.quarter), r.total_opens.to_string()))
      .collect(),
    FindingReport::RegisteredUsers(rows) => rows
      .iter()
      .map(|r| (period(r.year, r.quarter), r.users.to_string()))
      .collect(),
    FindingReport::TopDevices(rows) => rows
      .iter()
      .map(|r| (r.brand.clone(), r.total_users.to_string()))
      .collect(),
    FindingReport::AverageTransactionAmount(rows) => rows
      .iter()
      .map(|r| {
        let avg = r
          .avg_txn_amt
          .map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"));
        (period(r.year, r.quarter), avg)
      })
      .collect(),
    FindingReport::YearlyVolume(rows) => rows
      .iter()
      .map(|r| (r.year.to_string(), r.txn_count.to_string()))
      .collect(),
    FindingReport::QuarterlyAppOpens(rows) => rows
      .iter()
      .map(|r| (format!("Q{}", r.quarter), r.total_opens.to_string()))
      .collect(),
  }
}

/// Render `report` as a titled two-column table.
pub fn text(report: &FindingReport) -> String {
  let title = report.finding().title();
  let cells = cells(report);

  let mut out = format!("{title}\n{}\n", "─".repeat(title.chars().count()));
  if cells.is_empty() {
    out.push_str("(no rows)\n");
    return out;
  }

  let label_width = cells.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
  let value_width = cells.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
  for (label, value) in &cells {
    out.push_str(&format!("{label:<label_width$}  {value:>value_width$}\n"));
  }
  out
}

#[cfg(test)]
mod tests {
  use pulse_core::finding::{PeriodAverageAmount, TransactionTypeTotal};

  use super::*;

  #[test]
  fn empty_report_says_so() {
    let out = text(&FindingReport::YearlyVolume(vec![]));
    assert!(out.starts_with("Most Active Transaction Years\n"));
    assert!(out.ends_with("(no rows)\n"));
  }

  #[test]
  fn columns_are_aligned() {
    let out = text(&FindingReport::TopTransactionTypes(vec![
      TransactionTypeTotal { transaction_type: "Others".into(), total_amt: 5.0 },
      TransactionTypeTotal {
        transaction_type: "Merchant payments".into(),
        total_amt:        1234.5,
      },
    ]));

    let lines: Vec<_> = out.lines().skip(2).collect();
    assert_eq!(lines, [
      "Others                5.00",
      "Merchant payments  1234.50",
    ]);
  }

  #[test]
  fn undefined_average_renders_as_dash() {
    let out = text(&FindingReport::AverageTransactionAmount(vec![
      PeriodAverageAmount { year: 2022, quarter: 1, avg_txn_amt: None },
    ]));
    assert!(out.contains("2022 Q1  -"));
  }
}
