//! Core data types for tzrollup.
//!
//! - [`Granularity`] - Rollup resolution of a counter
//! - [`CalendarKeys`] - The five calendar bucket keys of one instant

use serde::{Deserialize, Serialize};

use crate::error::{Result, RollupError};

/// Rollup resolution of a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Yearly => write!(f, "yearly"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Weekly => write!(f, "weekly"),
            Granularity::Daily => write!(f, "daily"),
            Granularity::Hourly => write!(f, "hourly"),
        }
    }
}

/// Calendar bucket keys of a single instant.
///
/// Every field is optional so that contexts deserialized from buffers can
/// be checked before use; a context produced by
/// [`TimeContext`](crate::context::TimeContext) is always complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarKeys {
    /// `YYYY`
    pub yearly: Option<String>,
    /// `YYYY.M`
    pub monthly: Option<String>,
    /// `ceil(day_of_year / 7)`
    pub weekly: Option<u32>,
    /// `YYYY.M.D`
    pub daily: Option<String>,
    /// `YYYY.M.D.H`
    pub hourly: Option<String>,
}

/// A fully populated view of [`CalendarKeys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteKeys<'a> {
    pub yearly: &'a str,
    pub monthly: &'a str,
    pub weekly: u32,
    pub daily: &'a str,
    pub hourly: &'a str,
}

impl CalendarKeys {
    /// Check that every field is present and non-empty.
    ///
    /// Fails with [`RollupError::MalformedContext`] naming the first missing
    /// field. A weekly value of 0 counts as missing.
    pub fn complete(&self) -> Result<CompleteKeys<'_>> {
        fn present<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
            match value.as_deref() {
                Some(s) if !s.is_empty() => Ok(s),
                _ => Err(RollupError::MalformedContext(field)),
            }
        }

        let yearly = present(&self.yearly, "yearly")?;
        let monthly = present(&self.monthly, "monthly")?;
        let weekly = match self.weekly {
            Some(w) if w > 0 => w,
            _ => return Err(RollupError::MalformedContext("weekly")),
        };
        let daily = present(&self.daily, "daily")?;
        let hourly = present(&self.hourly, "hourly")?;

        Ok(CompleteKeys {
            yearly,
            monthly,
            weekly,
            daily,
            hourly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_keys() -> CalendarKeys {
        CalendarKeys {
            yearly: Some("2024".into()),
            monthly: Some("2024.3".into()),
            weekly: Some(11),
            daily: Some("2024.3.15".into()),
            hourly: Some("2024.3.15.10".into()),
        }
    }

    #[test]
    fn granularity_display() {
        assert_eq!(format!("{}", Granularity::Hourly), "hourly");
        assert_eq!(format!("{}", Granularity::Weekly), "weekly");
    }

    #[test]
    fn granularity_serialization() {
        assert_eq!(
            serde_json::to_string(&Granularity::Monthly).unwrap(),
            "\"monthly\""
        );
    }

    #[test]
    fn complete_keys_pass() {
        let keys = full_keys();
        let complete = keys.complete().unwrap();
        assert_eq!(complete.yearly, "2024");
        assert_eq!(complete.weekly, 11);
        assert_eq!(complete.hourly, "2024.3.15.10");
    }

    #[test]
    fn missing_field_is_named() {
        let mut keys = full_keys();
        keys.daily = None;
        assert_eq!(
            keys.complete().unwrap_err(),
            RollupError::MalformedContext("daily")
        );
    }

    #[test]
    fn empty_string_and_zero_week_count_as_missing() {
        let mut keys = full_keys();
        keys.monthly = Some(String::new());
        assert_eq!(
            keys.complete().unwrap_err(),
            RollupError::MalformedContext("monthly")
        );

        let mut keys = full_keys();
        keys.weekly = Some(0);
        assert_eq!(
            keys.complete().unwrap_err(),
            RollupError::MalformedContext("weekly")
        );
    }

    #[test]
    fn deserialize_partial_context() {
        let keys: CalendarKeys = serde_json::from_str(r#"{"yearly":"2024","weekly":3}"#).unwrap();
        assert_eq!(keys.yearly.as_deref(), Some("2024"));
        assert_eq!(keys.monthly, None);
        assert!(keys.complete().is_err());
    }
}
