//! SQLite storage layer.
//!
//! Repository implementations backed by SQLite with WAL mode and split
//! read/write connection pools. Each aggregate is stored as a JSON document
//! next to the columns the queries filter on.

pub mod booking;
pub mod pool;
pub mod profile;

use chrono::{DateTime, SecondsFormat, Utc};
use skillmart_types::error::RepositoryError;

/// Fixed-width RFC 3339 (`2025-01-06T09:00:00.000000Z`) so that text
/// comparison in SQL orders the same as time.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn query_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(err.to_string())
}
