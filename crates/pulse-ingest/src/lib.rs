//! Ingestion pipeline for Pulse aggregated exports.
//!
//! Source trees are laid out as
//! `<root>/aggregated/{transaction,user}/country/<region>/<year>/<quarter>.json`.
//! Ingestion runs in three steps:
//!
//! 1. [`discover_partitions`] lists the `(year, quarter)` files under one
//!    dataset root.
//! 2. [`extract_transactions`] and [`extract_users`] decode each file and
//!    flatten it into facts.
//! 3. [`load_all`] writes each extractor's output into a
//!    [`FactStore`](pulse_core::store::FactStore) in one commit.

mod document;
mod extract;
mod load;
mod partition;

pub mod error;

pub use error::{Error, Result};
pub use extract::{extract_transactions, extract_users};
pub use load::{LoadReport, load_all};
pub use partition::{Dataset, Partition, SourceLayout, discover_partitions};
