//! SQLite backend for the Pulse fact store.
//!
//! Owns a single synchronous [`rusqlite::Connection`] for the lifetime of the
//! store. Appends run inside explicit transactions; reads are plain
//! `SELECT ... GROUP BY` aggregates.

mod query;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
