//! Source document shapes.
//!
//! Each export file is decoded once into one of these records. Every field
//! that exports are known to omit is optional here, and all defaulting happens
//! in the `into_facts` conversions below rather than at access sites.

use std::fs;

use pulse_core::{
  fact::{DeviceUsageFact, TransactionFact, UNKNOWN_BRAND, UserSummaryFact},
  period::Period,
};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{Error, Result, partition::Partition};

/// Read and decode the document behind `partition`.
pub fn read_document<T: DeserializeOwned>(partition: &Partition) -> Result<T> {
  let bytes = fs::read(&partition.path).map_err(|source| Error::Read {
    path: partition.path.clone(),
    period: partition.period,
    source,
  })?;
  serde_json::from_slice(&bytes).map_err(|source| Error::Json {
    path: partition.path.clone(),
    period: partition.period,
    source,
  })
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TransactionDocument {
  #[serde(default)]
  data: Option<TransactionData>,
}

#[derive(Debug, Deserialize)]
struct TransactionData {
  #[serde(rename = "transactionData", default)]
  transaction_data: Option<Vec<TransactionEntry>>,
}

#[derive(Debug, Deserialize)]
struct TransactionEntry {
  name: String,
  #[serde(rename = "paymentInstruments", default)]
  payment_instruments: Option<Vec<PaymentInstrument>>,
}

#[derive(Debug, Deserialize)]
struct PaymentInstrument {
  count:  i64,
  amount: f64,
}

impl TransactionDocument {
  /// One fact per payment instrument of every transaction-type entry.
  pub fn into_facts(self, region: &str, period: Period) -> Vec<TransactionFact> {
    let entries = self
      .data
      .and_then(|d| d.transaction_data)
      .unwrap_or_default();

    entries
      .into_iter()
      .flat_map(|entry| {
        let name = entry.name;
        entry
          .payment_instruments
          .unwrap_or_default()
          .into_iter()
          .map(move |pi| TransactionFact {
            region: region.to_owned(),
            period,
            transaction_type: name.clone(),
            count: pi.count,
            amount: pi.amount,
          })
      })
      .collect()
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UserDocument {
  #[serde(default)]
  data: Option<UserData>,
}

#[derive(Debug, Default, Deserialize)]
struct UserData {
  #[serde(default)]
  aggregated:      Option<UserAggregate>,
  #[serde(rename = "usersByDevice", default)]
  users_by_device: DeviceBreakdown,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserAggregate {
  #[serde(default)]
  registered_users: Option<i64>,
  #[serde(default)]
  app_opens:        Option<i64>,
}

/// The `usersByDevice` field, which exports ship as a list, as `null`, or
/// occasionally in some other shape.
///
/// List elements stay undecoded here so that one bad entry cannot take the
/// rest of the list with it; see [`DeviceEntry::from_value`].
#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum DeviceBreakdown {
  List(Vec<serde_json::Value>),
  #[default]
  Missing,
  Other(serde_json::Value),
}

/// One element of `usersByDevice`. A field that is absent or of the wrong
/// type decodes as `None`.
#[derive(Debug, Default, Deserialize)]
struct DeviceEntry {
  #[serde(default, deserialize_with = "lenient")]
  brand:      Option<String>,
  #[serde(default, deserialize_with = "lenient")]
  count:      Option<i64>,
  #[serde(default, deserialize_with = "lenient")]
  percentage: Option<f64>,
}

impl DeviceEntry {
  /// Decode one list element. Anything that is not an object becomes an
  /// all-default entry.
  fn from_value(value: &serde_json::Value, period: Period) -> Self {
    match DeviceEntry::deserialize(value) {
      Ok(entry) => entry,
      Err(error) => {
        warn!(
          %period,
          shape = json_kind(value),
          %error,
          "device entry is not an object; recording defaults"
        );
        DeviceEntry::default()
      }
    }
  }
}

/// Decode a field as `T`, or `None` when the JSON value has another type.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  let value = serde_json::Value::deserialize(deserializer)?;
  match serde_json::from_value(value) {
    Ok(v) => Ok(Some(v)),
    Err(error) => {
      debug!(%error, "device field has an unexpected type; using default");
      Ok(None)
    }
  }
}

impl UserDocument {
  /// Exactly one summary, plus one device fact per listed element.
  pub fn into_facts(
    self,
    region: &str,
    period: Period,
  ) -> (UserSummaryFact, Vec<DeviceUsageFact>) {
    let data = self.data.unwrap_or_default();
    let aggregate = data.aggregated.unwrap_or_default();

    let summary = UserSummaryFact {
      region: region.to_owned(),
      period,
      registered_users: aggregate.registered_users.unwrap_or(0),
      app_opens: aggregate.app_opens.unwrap_or(0),
    };

    let devices = match data.users_by_device {
      DeviceBreakdown::List(values) => values
        .iter()
        .map(|value| {
          let dev = DeviceEntry::from_value(value, period);
          DeviceUsageFact {
            region: region.to_owned(),
            period,
            brand: dev.brand.unwrap_or_else(|| UNKNOWN_BRAND.to_owned()),
            user_count: dev.count.unwrap_or(0),
            percentage: dev.percentage.unwrap_or(0.0),
          }
        })
        .collect(),
      DeviceBreakdown::Missing => Vec::new(),
      DeviceBreakdown::Other(value) => {
        warn!(
          %period,
          shape = json_kind(&value),
          "usersByDevice is not a device list; no device rows"
        );
        Vec::new()
      }
    };

    (summary, devices)
  }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
  match value {
    serde_json::Value::Null => "null",
    serde_json::Value::Bool(_) => "bool",
    serde_json::Value::Number(_) => "number",
    serde_json::Value::String(_) => "string",
    serde_json::Value::Array(_) => "array",
    serde_json::Value::Object(_) => "object",
  }
}
