//! Date/time utilities for anonbbs.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings with microsecond
//! precision so that SQLite orders and compares them correctly as text.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::{BbsError, Result};

/// Current time truncated to the precision kept in the database.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    DateTime::from_timestamp_micros(micros).unwrap_or(now)
}

/// Format a timestamp for storage.
pub fn to_db(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339 and the plain SQLite `YYYY-MM-DD HH:MM:SS` format.
pub fn from_db(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| BbsError::Database(format!("invalid timestamp {s:?}: {e}")))
}
