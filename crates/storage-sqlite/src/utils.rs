//! Column encoding helpers shared by the repositories.
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC text with millisecond
//! precision (`2026-10-19T20:00:00.000Z`), so lexicographic order matches
//! chronological order and range filters can run on the text column.
//! Amounts are stored as decimal text to avoid float rounding.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use gertonargent_core::errors::{DatabaseError, Error, Result};
use rust_decimal::Decimal;

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            Error::Database(DatabaseError::CorruptRecord(format!(
                "Invalid timestamp '{}': {}",
                value, e
            )))
        })
}

pub fn parse_decimal(value: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        Error::Database(DatabaseError::CorruptRecord(format!(
            "Invalid amount '{}': {}",
            value, e
        )))
    })
}
