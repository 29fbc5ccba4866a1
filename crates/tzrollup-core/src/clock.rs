//! Clock capability.
//!
//! The context builder never reads the wall clock directly; it asks a
//! [`Clock`]. Production code passes [`SystemClock`], tests and reproducible
//! CLI runs pass a [`FixedClock`].

use chrono::{DateTime, TimeZone, Utc};

/// A source of the current time.
pub trait Clock: Send + Sync {
    /// Current time as Unix epoch seconds.
    fn now_epoch_secs(&self) -> i64;

    /// Current time as a UTC datetime, truncated to whole seconds.
    fn now(&self) -> DateTime<Utc> {
        let secs = self.now_epoch_secs();
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock frozen at a given epoch second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_constant() {
        let clock = FixedClock(1_710_496_800);
        assert_eq!(clock.now_epoch_secs(), 1_710_496_800);
        assert_eq!(
            clock.now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            "2024-03-15T10:00:00Z"
        );
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_epoch_secs() > 1_577_836_800);
    }
}
