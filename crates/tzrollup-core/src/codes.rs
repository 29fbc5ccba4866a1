//! Short-code dictionaries.
//!
//! Storage documents never spell out metric or user-property names; each
//! one is abbreviated to a short code. The tables here are fixed at compile
//! time and the code strings are part of the storage format, so they must
//! never change:
//! - [`MetricCode`] - counters kept in the time-bucketed rollup documents
//! - [`UserProperty`] - fields kept on per-user documents
//!
//! Both types print as their storage code.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, RollupError};

/// Metric short codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricCode {
    Events,
    Total,
    New,
    /// Unique (distinct user) counts.
    Unique,
    Duration,
    /// Duration histogram buckets.
    Durations,
    /// Session frequency buckets.
    Frequency,
    /// Loyalty (session count) buckets.
    Loyalty,
    Sum,
    Count,
    /// Push messaging opt-in snapshot.
    MessagingEnabled,
}

impl MetricCode {
    pub const ALL: [MetricCode; 11] = [
        MetricCode::Events,
        MetricCode::Total,
        MetricCode::New,
        MetricCode::Unique,
        MetricCode::Duration,
        MetricCode::Durations,
        MetricCode::Frequency,
        MetricCode::Loyalty,
        MetricCode::Sum,
        MetricCode::Count,
        MetricCode::MessagingEnabled,
    ];

    /// The storage code.
    pub const fn code(self) -> &'static str {
        match self {
            MetricCode::Events => "e",
            MetricCode::Total => "t",
            MetricCode::New => "n",
            MetricCode::Unique => "u",
            MetricCode::Duration => "d",
            MetricCode::Durations => "ds",
            MetricCode::Frequency => "f",
            MetricCode::Loyalty => "l",
            MetricCode::Sum => "s",
            MetricCode::Count => "c",
            MetricCode::MessagingEnabled => "m",
        }
    }

    /// The human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            MetricCode::Events => "events",
            MetricCode::Total => "total",
            MetricCode::New => "new",
            MetricCode::Unique => "unique",
            MetricCode::Duration => "duration",
            MetricCode::Durations => "durations",
            MetricCode::Frequency => "frequency",
            MetricCode::Loyalty => "loyalty",
            MetricCode::Sum => "sum",
            MetricCode::Count => "count",
            MetricCode::MessagingEnabled => "messaging-enabled",
        }
    }

    /// Reverse lookup from a storage code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }
}

impl fmt::Display for MetricCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MetricCode {
    type Err = RollupError;

    /// Parses a human-readable metric name.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| RollupError::ParseError(format!("Unknown metric name: '{}'", s)))
    }
}

/// User-property short codes.
///
/// Push token slots have numeric aliases (`apn_0`, `gcm_2`, ...) that share
/// a variant with their descriptive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserProperty {
    DeviceId,
    FirstSeen,
    LastSeen,
    SessionDuration,
    TotalSessionDuration,
    SessionCount,
    Device,
    Carrier,
    City,
    CountryCode,
    Platform,
    PlatformVersion,
    AppVersion,
    LastBeginSessionTimestamp,
    LastEndSessionTimestamp,
    HasOngoingSession,
    Tokens,
    ApnProduction,
    ApnDevelopment,
    ApnAdHoc,
    GcmProduction,
    GcmTest,
    /// Full ISO locale reported by the device.
    Locale,
    /// Language extracted from the locale.
    Lang,
}

impl UserProperty {
    pub const ALL: [UserProperty; 24] = [
        UserProperty::DeviceId,
        UserProperty::FirstSeen,
        UserProperty::LastSeen,
        UserProperty::SessionDuration,
        UserProperty::TotalSessionDuration,
        UserProperty::SessionCount,
        UserProperty::Device,
        UserProperty::Carrier,
        UserProperty::City,
        UserProperty::CountryCode,
        UserProperty::Platform,
        UserProperty::PlatformVersion,
        UserProperty::AppVersion,
        UserProperty::LastBeginSessionTimestamp,
        UserProperty::LastEndSessionTimestamp,
        UserProperty::HasOngoingSession,
        UserProperty::Tokens,
        UserProperty::ApnProduction,
        UserProperty::ApnDevelopment,
        UserProperty::ApnAdHoc,
        UserProperty::GcmProduction,
        UserProperty::GcmTest,
        UserProperty::Locale,
        UserProperty::Lang,
    ];

    /// The storage code.
    pub const fn code(self) -> &'static str {
        match self {
            UserProperty::DeviceId => "did",
            UserProperty::FirstSeen => "fs",
            UserProperty::LastSeen => "ls",
            UserProperty::SessionDuration => "sd",
            UserProperty::TotalSessionDuration => "tsd",
            UserProperty::SessionCount => "sc",
            UserProperty::Device => "d",
            UserProperty::Carrier => "c",
            UserProperty::City => "cty",
            UserProperty::CountryCode => "cc",
            UserProperty::Platform => "p",
            UserProperty::PlatformVersion => "pv",
            UserProperty::AppVersion => "av",
            UserProperty::LastBeginSessionTimestamp => "lbst",
            UserProperty::LastEndSessionTimestamp => "lest",
            UserProperty::HasOngoingSession => "hos",
            UserProperty::Tokens => "tk",
            UserProperty::ApnProduction => "ip",
            UserProperty::ApnDevelopment => "id",
            UserProperty::ApnAdHoc => "ia",
            UserProperty::GcmProduction => "ap",
            UserProperty::GcmTest => "at",
            UserProperty::Locale => "lo",
            UserProperty::Lang => "la",
        }
    }

    /// The canonical human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            UserProperty::DeviceId => "device_id",
            UserProperty::FirstSeen => "first_seen",
            UserProperty::LastSeen => "last_seen",
            UserProperty::SessionDuration => "session_duration",
            UserProperty::TotalSessionDuration => "total_session_duration",
            UserProperty::SessionCount => "session_count",
            UserProperty::Device => "device",
            UserProperty::Carrier => "carrier",
            UserProperty::City => "city",
            UserProperty::CountryCode => "country_code",
            UserProperty::Platform => "platform",
            UserProperty::PlatformVersion => "platform_version",
            UserProperty::AppVersion => "app_version",
            UserProperty::LastBeginSessionTimestamp => "last_begin_session_timestamp",
            UserProperty::LastEndSessionTimestamp => "last_end_session_timestamp",
            UserProperty::HasOngoingSession => "has_ongoing_session",
            UserProperty::Tokens => "tokens",
            UserProperty::ApnProduction => "apn_prod",
            UserProperty::ApnDevelopment => "apn_dev",
            UserProperty::ApnAdHoc => "apn_adhoc",
            UserProperty::GcmProduction => "gcm_prod",
            UserProperty::GcmTest => "gcm_test",
            UserProperty::Locale => "locale",
            UserProperty::Lang => "lang",
        }
    }

    /// Reverse lookup from a storage code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for UserProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UserProperty {
    type Err = RollupError;

    /// Parses a human-readable property name, including token slot aliases.
    fn from_str(s: &str) -> Result<Self> {
        let alias = match s {
            "apn_0" => Some(UserProperty::ApnProduction),
            "apn_1" => Some(UserProperty::ApnDevelopment),
            "apn_2" => Some(UserProperty::ApnAdHoc),
            "gcm_0" => Some(UserProperty::GcmProduction),
            "gcm_2" => Some(UserProperty::GcmTest),
            _ => None,
        };

        alias
            .or_else(|| Self::ALL.into_iter().find(|p| p.name() == s))
            .ok_or_else(|| RollupError::ParseError(format!("Unknown user property: '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn metric_codes_match_storage_format() {
        assert_eq!(MetricCode::Unique.code(), "u");
        assert_eq!(MetricCode::Frequency.code(), "f");
        assert_eq!(MetricCode::Loyalty.code(), "l");
        assert_eq!(MetricCode::Durations.code(), "ds");
        assert_eq!(MetricCode::MessagingEnabled.code(), "m");
    }

    #[test]
    fn metric_codes_are_distinct() {
        let codes: HashSet<_> = MetricCode::ALL.iter().map(|m| m.code()).collect();
        assert_eq!(codes.len(), MetricCode::ALL.len());
    }

    #[test]
    fn metric_name_and_code_lookup() {
        assert_eq!(
            MetricCode::from_str("messaging-enabled").unwrap(),
            MetricCode::MessagingEnabled
        );
        assert_eq!(MetricCode::from_code("ds"), Some(MetricCode::Durations));
        assert_eq!(MetricCode::from_code("zz"), None);
        assert!(MetricCode::from_str("uniques").is_err());
    }

    #[test]
    fn metric_display_is_code() {
        assert_eq!(format!("{}", MetricCode::Count), "c");
    }

    #[test]
    fn user_property_aliases_share_codes() {
        assert_eq!(
            UserProperty::from_str("apn_0").unwrap(),
            UserProperty::from_str("apn_prod").unwrap()
        );
        assert_eq!(UserProperty::from_str("gcm_2").unwrap().code(), "at");
        assert_eq!(UserProperty::from_str("apn_1").unwrap().code(), "id");
    }

    #[test]
    fn user_property_reverse_lookup_gives_canonical_name() {
        assert_eq!(UserProperty::from_code("ip").unwrap().name(), "apn_prod");
        assert_eq!(UserProperty::from_code("cty"), Some(UserProperty::City));
        assert_eq!(UserProperty::from_code("nope"), None);
    }

    #[test]
    fn user_property_codes_are_distinct() {
        let codes: HashSet<_> = UserProperty::ALL.iter().map(|p| p.code()).collect();
        assert_eq!(codes.len(), UserProperty::ALL.len());
    }
}
