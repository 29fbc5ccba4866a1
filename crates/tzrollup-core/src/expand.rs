//! Bucket key expansion.
//!
//! One measurement is fanned out into a counter per granularity. Every
//! property gets yearly, monthly and daily counters. Flat properties also
//! get an hourly counter; segmented properties (containing a dot, such as
//! `TR.u`) do not, to keep per-hour per-segment cardinality bounded. A few
//! metric classes additionally get a weekly counter stored under the year
//! as `YYYY.w<week>.<property>`.

use tracing::trace;

use crate::codes::MetricCode;
use crate::error::Result;
use crate::increments::IncrementSet;
use crate::models::{CalendarKeys, Granularity};

/// Increment applied when none is given.
pub const DEFAULT_INCREMENT: i64 = 1;

/// Whether `property` receives a weekly rollup.
///
/// True for unique counts (`u` or `<segment>.u`), frequency, loyalty and
/// duration histogram buckets (`f.*`, `l.*`, `ds.*`) and the messaging
/// opt-in snapshot (`m`).
pub fn is_weekly_eligible(property: &str) -> bool {
    let unique = MetricCode::Unique.code();
    let has_prefix = |code: MetricCode| {
        property
            .strip_prefix(code.code())
            .is_some_and(|rest| rest.starts_with('.'))
    };

    property == unique
        || property
            .strip_suffix(unique)
            .is_some_and(|head| head.ends_with('.'))
        || has_prefix(MetricCode::Frequency)
        || has_prefix(MetricCode::Loyalty)
        || has_prefix(MetricCode::Durations)
        || property == MetricCode::MessagingEnabled.code()
}

/// Whether `property` receives an hourly rollup.
pub fn is_hourly_eligible(property: &str) -> bool {
    !property.contains('.')
}

/// The granularities `property` is counted at, coarsest first.
pub fn granularities_for(property: &str) -> Vec<Granularity> {
    let mut out = vec![Granularity::Yearly, Granularity::Monthly];
    if is_weekly_eligible(property) {
        out.push(Granularity::Weekly);
    }
    out.push(Granularity::Daily);
    if is_hourly_eligible(property) {
        out.push(Granularity::Hourly);
    }
    out
}

/// Expand a property into its bucket paths.
///
/// `increment` defaults to [`DEFAULT_INCREMENT`]; a zero increment is
/// treated the same as a missing one.
///
/// Fails with [`RollupError::MalformedContext`](crate::RollupError::MalformedContext)
/// if `keys` lacks any field, before anything is emitted.
///
/// # Examples
///
/// ```
/// use tzrollup_core::expand::expand;
/// use tzrollup_core::models::CalendarKeys;
///
/// let keys = CalendarKeys {
///     yearly: Some("2024".into()),
///     monthly: Some("2024.3".into()),
///     weekly: Some(11),
///     daily: Some("2024.3.15".into()),
///     hourly: Some("2024.3.15.10".into()),
/// };
/// let set = expand("TR.u", Some(5), &keys).unwrap();
///
/// assert_eq!(set.len(), 4);
/// assert_eq!(set.get("2024.w11.TR.u"), Some(5));
/// assert_eq!(set.get("2024.3.15.10.TR.u"), None);
/// ```
pub fn expand(property: &str, increment: Option<i64>, keys: &CalendarKeys) -> Result<IncrementSet> {
    let keys = keys.complete()?;
    let increment = match increment {
        Some(n) if n != 0 => n,
        _ => DEFAULT_INCREMENT,
    };

    let mut set = IncrementSet::new();
    set.insert(format!("{}.{}", keys.yearly, property), increment);
    set.insert(format!("{}.{}", keys.monthly, property), increment);
    set.insert(format!("{}.{}", keys.daily, property), increment);

    if is_hourly_eligible(property) {
        set.insert(format!("{}.{}", keys.hourly, property), increment);
    }

    if is_weekly_eligible(property) {
        set.insert(
            format!("{}.w{}.{}", keys.yearly, keys.weekly, property),
            increment,
        );
    }

    trace!(property, entries = set.len(), "expanded bucket keys");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::context::TimeContext;
    use crate::error::RollupError;
    use crate::tz::parse_tz;

    fn keys() -> CalendarKeys {
        CalendarKeys {
            yearly: Some("2024".into()),
            monthly: Some("2024.3".into()),
            weekly: Some(11),
            daily: Some("2024.3.15".into()),
            hourly: Some("2024.3.15.10".into()),
        }
    }

    fn entries(set: &IncrementSet) -> Vec<(&str, i64)> {
        set.iter().map(|(k, v)| (k.as_str(), *v)).collect()
    }

    #[test]
    fn unique_code_gets_all_five() {
        let set = expand("u", Some(1), &keys()).unwrap();
        assert_eq!(
            entries(&set),
            vec![
                ("2024.3.15.10.u", 1),
                ("2024.3.15.u", 1),
                ("2024.3.u", 1),
                ("2024.u", 1),
                ("2024.w11.u", 1),
            ]
        );
    }

    #[test]
    fn segmented_unique_skips_hourly() {
        let set = expand("TR.u", Some(5), &keys()).unwrap();
        assert_eq!(
            entries(&set),
            vec![
                ("2024.3.15.TR.u", 5),
                ("2024.3.TR.u", 5),
                ("2024.TR.u", 5),
                ("2024.w11.TR.u", 5),
            ]
        );
    }

    #[test]
    fn plain_count_has_no_weekly() {
        let set = expand("c", Some(3), &keys()).unwrap();
        assert_eq!(
            entries(&set),
            vec![
                ("2024.3.15.10.c", 3),
                ("2024.3.15.c", 3),
                ("2024.3.c", 3),
                ("2024.c", 3),
            ]
        );
    }

    #[test]
    fn segmented_count_gets_three() {
        let set = expand("TR.c", Some(2), &keys()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("2024.3.15.TR.c"), Some(2));
    }

    #[test]
    fn increment_defaults_to_one() {
        let set = expand("n", None, &keys()).unwrap();
        assert!(set.iter().all(|(_, v)| *v == 1));

        let set = expand("n", Some(0), &keys()).unwrap();
        assert!(set.iter().all(|(_, v)| *v == 1));
    }

    #[test]
    fn negative_increment_is_kept() {
        let set = expand("t", Some(-2), &keys()).unwrap();
        assert_eq!(set.get("2024.t"), Some(-2));
    }

    #[test]
    fn weekly_classes() {
        for property in ["u", "TR.u", "f.1", "l.2-5", "ds.11-30", "m"] {
            assert!(is_weekly_eligible(property), "{property} should be weekly");
        }
        for property in ["c", "e", "s", "d", "ds", "f", "l", "uu", "TRu", "mm", "m.x", "xf.1"] {
            assert!(!is_weekly_eligible(property), "{property} should not be weekly");
        }
    }

    #[test]
    fn flat_weekly_metric_gets_five_entries() {
        assert_eq!(expand("m", None, &keys()).unwrap().len(), 5);
    }

    #[test]
    fn dotted_weekly_metric_has_no_hourly() {
        let set = expand("f.1", None, &keys()).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.get("2024.w11.f.1"), Some(1));
        assert!(set.keys().all(|k| !k.starts_with("2024.3.15.10.")));
    }

    #[test]
    fn malformed_context_fails_without_output() {
        let mut partial = keys();
        partial.hourly = None;
        assert_eq!(
            expand("c", None, &partial).unwrap_err(),
            RollupError::MalformedContext("hourly")
        );

        assert_eq!(
            expand("c", None, &CalendarKeys::default()).unwrap_err(),
            RollupError::MalformedContext("yearly")
        );
    }

    #[test]
    fn expansion_is_pure() {
        let first = expand("TR.u", Some(4), &keys()).unwrap();
        let second = expand("TR.u", Some(4), &keys()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn granularities_match_expansion() {
        assert_eq!(
            granularities_for("u"),
            vec![
                Granularity::Yearly,
                Granularity::Monthly,
                Granularity::Weekly,
                Granularity::Daily,
                Granularity::Hourly,
            ]
        );
        assert_eq!(
            granularities_for("TR.c"),
            vec![Granularity::Yearly, Granularity::Monthly, Granularity::Daily]
        );
        for property in ["u", "TR.u", "c", "ds.1-10", "m"] {
            assert_eq!(
                granularities_for(property).len(),
                expand(property, None, &keys()).unwrap().len()
            );
        }
    }

    #[test]
    fn expands_from_built_context() {
        let ctx = TimeContext::build(
            parse_tz("Europe/Berlin").unwrap(),
            Some(&"1710496800".into()),
            &FixedClock(1_710_500_000),
        );
        let set = expand("u", None, &ctx.calendar_keys()).unwrap();
        assert_eq!(set.get("2024.3.15.11.u"), Some(1));
        assert_eq!(set.get("2024.w11.u"), Some(1));
    }
}
