//! SQL schema for the Pulse SQLite store.
//!
//! The column set is fixed; there is no migration path and no version
//! metadata in the file.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Fact tables are append-only and keyless.

CREATE TABLE IF NOT EXISTS aggregated_transaction (
    region           TEXT    NOT NULL,
    year             INTEGER NOT NULL,
    quarter          INTEGER NOT NULL,
    transaction_type TEXT    NOT NULL,
    count            INTEGER NOT NULL,
    amount           REAL    NOT NULL
);

CREATE TABLE IF NOT EXISTS aggregated_user_summary (
    region           TEXT    NOT NULL,
    year             INTEGER NOT NULL,
    quarter          INTEGER NOT NULL,
    registered_users INTEGER NOT NULL,
    app_opens        INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS aggregated_user_by_device (
    region           TEXT    NOT NULL,
    year             INTEGER NOT NULL,
    quarter          INTEGER NOT NULL,
    brand            TEXT    NOT NULL,
    user_count       INTEGER NOT NULL,
    percentage       REAL    NOT NULL
);
";

/// Names of the fact tables, in creation order.
pub const TABLES: [&str; 3] = [
  "aggregated_transaction",
  "aggregated_user_summary",
  "aggregated_user_by_device",
];

/// Empties every fact table; run inside a transaction.
pub const RESET: &str = "
DELETE FROM aggregated_transaction;
DELETE FROM aggregated_user_summary;
DELETE FROM aggregated_user_by_device;
";
