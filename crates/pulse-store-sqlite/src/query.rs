//! SQL text for appends and for the finding catalog.
//!
//! Descending findings break ties on the grouping key so that results are
//! stable across runs. "Top" findings take their limit as `?1`.

// ─── Appends ─────────────────────────────────────────────────────────────────

pub const INSERT_TRANSACTION: &str = "
INSERT INTO aggregated_transaction
    (region, year, quarter, transaction_type, count, amount)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

pub const INSERT_USER_SUMMARY: &str = "
INSERT INTO aggregated_user_summary
    (region, year, quarter, registered_users, app_opens)
VALUES (?1, ?2, ?3, ?4, ?5)";

pub const INSERT_DEVICE_USAGE: &str = "
INSERT INTO aggregated_user_by_device
    (region, year, quarter, brand, user_count, percentage)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

// ─── Findings ────────────────────────────────────────────────────────────────

pub const TOP_TRANSACTION_TYPES: &str = "
SELECT transaction_type, SUM(amount) AS total_amt
FROM aggregated_transaction
GROUP BY transaction_type
ORDER BY total_amt DESC, transaction_type ASC
LIMIT ?1";

pub const TRANSACTION_VOLUME: &str = "
SELECT year, quarter, SUM(count) AS txn_count
FROM aggregated_transaction
GROUP BY year, quarter
ORDER BY year ASC, quarter ASC";

pub const APP_OPENS: &str = "
SELECT year, quarter, SUM(app_opens) AS total_opens
FROM aggregated_user_summary
GROUP BY year, quarter
ORDER BY year ASC, quarter ASC";

pub const REGISTERED_USERS: &str = "
SELECT year, quarter, SUM(registered_users) AS users
FROM aggregated_user_summary
GROUP BY year, quarter
ORDER BY year ASC, quarter ASC";

pub const TOP_DEVICES: &str = "
SELECT brand, SUM(user_count) AS total_users
FROM aggregated_user_by_device
GROUP BY brand
ORDER BY total_users DESC, brand ASC
LIMIT ?1";

// A period whose counts sum to zero averages to NULL.
pub const AVERAGE_TRANSACTION_AMOUNT: &str = "
SELECT year, quarter, SUM(amount) * 1.0 / NULLIF(SUM(count), 0) AS avg_txn_amt
FROM aggregated_transaction
GROUP BY year, quarter
ORDER BY year ASC, quarter ASC";

pub const YEARLY_VOLUME: &str = "
SELECT year, SUM(count) AS txn_count
FROM aggregated_transaction
GROUP BY year
ORDER BY txn_count DESC, year ASC";

pub const QUARTERLY_APP_OPENS: &str = "
SELECT quarter, SUM(app_opens) AS total_opens
FROM aggregated_user_summary
GROUP BY quarter
ORDER BY total_opens DESC, quarter ASC";
