//! Calendar date parsing for request payloads and query strings.

use chrono::{DateTime, NaiveDate};

use crate::error::{CoreError, CoreResult};

/// ## Summary
/// Parses a calendar date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// For timestamps only the date part as written is kept; no timezone
/// conversion happens.
///
/// ## Errors
/// Returns `CoreError::InvalidDate` if neither form matches.
pub fn parse_calendar_date(value: &str) -> CoreResult<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|_err| CoreError::InvalidDate(value.to_string()))
}
