//! Time utilities: transaction timestamps as local wall-clock time.
//!
//! The optimizer works on naive local date-times; these helpers turn user
//! input or the current instant into one for a given IANA zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::calendar::start_of_day;
use crate::error::{MonetaError, Result};

pub const DEFAULT_TIMEZONE: &str = "Asia/Ho_Chi_Minh";

pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.parse()
        .map_err(|_| MonetaError::InvalidConfig(format!("invalid timezone: {tz}")))
}

/// Parse "2026-02-20", "2026-02-20 23:59", "2026-02-20T23:59:00" or an
/// RFC 3339 timestamp. Offsets are converted to wall time in `tz`.
pub fn parse_transaction_date(input: &str, tz: &str) -> Result<NaiveDateTime> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        let tz = parse_timezone(tz)?;
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|e| MonetaError::invalid_date(input, e))
}

/// Local wall-clock time of `instant` in `tz`.
pub fn local_time_in(instant: DateTime<Utc>, tz: &str) -> Result<NaiveDateTime> {
    let tz = parse_timezone(tz)?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// Current wall-clock time in `tz`.
pub fn now_in(tz: &str) -> Result<NaiveDateTime> {
    local_time_in(Utc::now(), tz)
}
