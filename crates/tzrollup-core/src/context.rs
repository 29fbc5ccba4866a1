//! Time context construction.
//!
//! A [`TimeContext`] is a snapshot of one resolved instant in an app's
//! timezone together with the calendar bucket keys derived from it. All
//! keys come from the same local datetime, so `monthly` is always a prefix
//! of `daily` and `daily` a prefix of `hourly`.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::clock::Clock;
use crate::models::CalendarKeys;
use crate::parse::{ClientTimestamp, resolve_timestamp};
use crate::tz::utc_to_local;

/// Immutable snapshot of a resolved instant and its calendar buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeContext {
    timestamp: i64,
    local: DateTime<Tz>,
    utc: DateTime<Utc>,
    now_without_override: DateTime<Tz>,
    yearly: String,
    monthly: String,
    daily: String,
    hourly: String,
    weekly: u32,
}

impl TimeContext {
    /// Build a context for `tz`, preferring the client timestamp when usable.
    ///
    /// The client timestamp is trusted only if it is a 10-character finite
    /// number not later than the clock's now; otherwise the clock's now is
    /// used. This never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tzrollup_core::clock::FixedClock;
    /// use tzrollup_core::context::TimeContext;
    /// use tzrollup_core::parse::ClientTimestamp;
    /// use tzrollup_core::tz::parse_tz;
    ///
    /// let tz = parse_tz("Europe/Berlin").unwrap();
    /// let clock = FixedClock(1_710_500_000);
    /// let ts = ClientTimestamp::from("1710496800");
    /// let ctx = TimeContext::build(tz, Some(&ts), &clock);
    ///
    /// assert_eq!(ctx.timestamp(), 1_710_496_800);
    /// assert_eq!(ctx.hourly(), "2024.3.15.11");
    /// assert_eq!(ctx.weekly(), 11);
    /// ```
    pub fn build<C: Clock + ?Sized>(
        tz: Tz,
        client_timestamp: Option<&ClientTimestamp<'_>>,
        clock: &C,
    ) -> Self {
        let now = clock.now();
        let timestamp = resolve_timestamp(client_timestamp, now.timestamp());

        let utc = Utc.timestamp_opt(timestamp, 0).single().unwrap_or(now);
        let local = utc_to_local(utc, tz);
        let now_without_override = utc_to_local(now, tz);

        Self::from_parts(timestamp, local, utc, now_without_override)
    }

    fn from_parts(
        timestamp: i64,
        local: DateTime<Tz>,
        utc: DateTime<Utc>,
        now_without_override: DateTime<Tz>,
    ) -> Self {
        let yearly = format!("{}", local.year());
        let monthly = format!("{}.{}", yearly, local.month());
        let daily = format!("{}.{}", monthly, local.day());
        let hourly = format!("{}.{}", daily, local.hour());
        let weekly = local.ordinal().div_ceil(7);

        TimeContext {
            timestamp,
            local,
            utc,
            now_without_override,
            yearly,
            monthly,
            daily,
            hourly,
            weekly,
        }
    }

    /// The authoritative instant in epoch seconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The instant on the app's local wall clock.
    pub fn local(&self) -> &DateTime<Tz> {
        &self.local
    }

    /// The instant in UTC.
    pub fn utc(&self) -> &DateTime<Utc> {
        &self.utc
    }

    /// The server's own now in the app's timezone, ignoring any client
    /// timestamp.
    pub fn now_without_override(&self) -> &DateTime<Tz> {
        &self.now_without_override
    }

    pub fn timezone(&self) -> Tz {
        self.local.timezone()
    }

    pub fn yearly(&self) -> &str {
        &self.yearly
    }

    pub fn monthly(&self) -> &str {
        &self.monthly
    }

    pub fn daily(&self) -> &str {
        &self.daily
    }

    pub fn hourly(&self) -> &str {
        &self.hourly
    }

    /// `ceil(day_of_year / 7)` on the local calendar. Not an ISO week.
    pub fn weekly(&self) -> u32 {
        self.weekly
    }

    /// The bucket keys as a complete [`CalendarKeys`].
    pub fn calendar_keys(&self) -> CalendarKeys {
        CalendarKeys {
            yearly: Some(self.yearly.clone()),
            monthly: Some(self.monthly.clone()),
            weekly: Some(self.weekly),
            daily: Some(self.daily.clone()),
            hourly: Some(self.hourly.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::tz::parse_tz;

    const NOW: i64 = 1_710_500_000; // 2024-03-15T10:53:20Z

    fn build(tz: &str, ts: Option<ClientTimestamp<'_>>, now: i64) -> TimeContext {
        TimeContext::build(parse_tz(tz).unwrap(), ts.as_ref(), &FixedClock(now))
    }

    #[test]
    fn keys_in_utc() {
        let ctx = build("UTC", Some("1710496800".into()), NOW);

        assert_eq!(ctx.timestamp(), 1_710_496_800);
        assert_eq!(ctx.yearly(), "2024");
        assert_eq!(ctx.monthly(), "2024.3");
        assert_eq!(ctx.daily(), "2024.3.15");
        assert_eq!(ctx.hourly(), "2024.3.15.10");
        assert_eq!(ctx.weekly(), 11);
    }

    #[test]
    fn keys_follow_local_timezone() {
        // 2024-03-15T10:00:00Z is 19:00 in Tokyo and 06:00 in New York.
        let tokyo = build("Asia/Tokyo", Some("1710496800".into()), NOW);
        assert_eq!(tokyo.hourly(), "2024.3.15.19");

        let new_york = build("America/New_York", Some("1710496800".into()), NOW);
        assert_eq!(new_york.hourly(), "2024.3.15.6");
        assert_eq!(new_york.utc().timestamp(), 1_710_496_800);
    }

    #[test]
    fn year_boundary_depends_on_zone() {
        // 2023-12-31T23:59:59Z
        let berlin = build("Europe/Berlin", Some("1704067199".into()), NOW);
        assert_eq!(berlin.yearly(), "2024");
        assert_eq!(berlin.hourly(), "2024.1.1.0");
        assert_eq!(berlin.weekly(), 1);

        let utc = build("UTC", Some("1704067199".into()), NOW);
        assert_eq!(utc.hourly(), "2023.12.31.23");
        assert_eq!(utc.weekly(), 53);
    }

    #[test]
    fn last_day_of_leap_year_is_week_53() {
        // 2024-12-31T12:00:00Z, day 366
        let ctx = build("UTC", Some("1735646400".into()), 1_800_000_000);
        assert_eq!(ctx.daily(), "2024.12.31");
        assert_eq!(ctx.weekly(), 53);
    }

    #[test]
    fn first_week_spans_days_one_to_seven() {
        // 2024-01-07T12:00:00Z is day 7, 2024-01-08T12:00:00Z day 8
        assert_eq!(build("UTC", Some("1704628800".into()), NOW).weekly(), 1);
        assert_eq!(build("UTC", Some("1704715200".into()), NOW).weekly(), 2);
    }

    #[test]
    fn future_timestamp_is_clamped() {
        let ctx = build("UTC", Some("1999999999".into()), NOW);
        assert_eq!(ctx.timestamp(), NOW);
        assert_eq!(ctx.hourly(), "2024.3.15.10");
    }

    #[test]
    fn unusable_timestamp_behaves_like_none() {
        let without = build("Europe/Berlin", None, NOW);
        for raw in ["abc", "171049680", "17104968000", "1710496800000"] {
            let ctx = build("Europe/Berlin", Some(raw.into()), NOW);
            assert_eq!(ctx, without, "input {raw}");
        }
    }

    #[test]
    fn numeric_timestamp_is_accepted() {
        let ctx = build("UTC", Some(1_710_496_800_i64.into()), NOW);
        assert_eq!(ctx.timestamp(), 1_710_496_800);
    }

    #[test]
    fn now_without_override_ignores_client_timestamp() {
        let ctx = build("Europe/Berlin", Some("1700000000".into()), NOW);
        assert_eq!(ctx.timestamp(), 1_700_000_000);
        assert_eq!(ctx.now_without_override().timestamp(), NOW);
        assert_eq!(ctx.now_without_override().timezone(), ctx.timezone());
    }

    #[test]
    fn local_and_utc_are_the_same_instant() {
        let ctx = build("America/New_York", Some("1710496800".into()), NOW);
        assert_eq!(ctx.local().timestamp(), ctx.utc().timestamp());
        assert_eq!(ctx.timezone().to_string(), "America/New_York");
    }

    #[test]
    fn monthly_daily_hourly_are_nested() {
        for (tz, ts) in [
            ("UTC", 1_704_067_199_i64),
            ("Asia/Kolkata", 1_711_846_800),
            ("Pacific/Chatham", 1_703_980_800),
            ("America/St_Johns", 1_710_496_800),
        ] {
            let ctx = build(tz, Some(ts.into()), NOW);
            assert!(ctx.daily().starts_with(&format!("{}.", ctx.monthly())));
            assert!(ctx.hourly().starts_with(&format!("{}.", ctx.daily())));
            assert!(ctx.monthly().starts_with(&format!("{}.", ctx.yearly())));
        }
    }

    #[test]
    fn calendar_keys_are_complete() {
        let ctx = build("UTC", Some("1710496800".into()), NOW);
        let keys = ctx.calendar_keys();
        let complete = keys.complete().unwrap();
        assert_eq!(complete.daily, "2024.3.15");
        assert_eq!(complete.weekly, 11);
    }
}
