//! Timezone handling utilities.
//!
//! This module provides functions for parsing timezone names and
//! converting UTC instants into the calendar of an app's timezone.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, RollupError};

/// Parse an IANA timezone name into a [`chrono_tz::Tz`].
///
/// # Examples
///
/// ```
/// use tzrollup_core::tz::parse_tz;
///
/// let tz = parse_tz("Europe/Berlin").unwrap();
/// assert_eq!(tz.to_string(), "Europe/Berlin");
/// ```
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| RollupError::InvalidTimezone(name.to_string()))
}

/// Convert a UTC datetime to local time in the specified timezone.
pub fn utc_to_local(utc: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    utc.with_timezone(&tz)
}

/// The 1-based day of the year of `instant` in the calendar of `tz`.
///
/// The day is taken from the local wall clock, so the same instant can
/// fall on day 366 in one zone and day 1 in another.
pub fn day_of_year(instant: DateTime<Utc>, tz: Tz) -> u32 {
    utc_to_local(instant, tz).ordinal()
}

/// Format a datetime as RFC3339 with timezone offset.
///
/// Returns e.g. `"2024-03-15T11:00:00+01:00"`.
pub fn format_rfc3339<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format a UTC datetime as RFC3339 with Z suffix.
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
