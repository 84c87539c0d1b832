//! Core types and trait definitions for the Pulse insights store.
//!
//! This crate is free of filesystem and database dependencies.
//! Ingestion and storage crates depend on it; it depends on nothing of
//! theirs.

pub mod error;
pub mod fact;
pub mod finding;
pub mod period;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
