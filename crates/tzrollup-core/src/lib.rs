//! # tzrollup-core
//!
//! Timezone-aware key derivation for rolling event counters.
//!
//! An incoming measurement is counted at several calendar granularities at
//! once. This library turns one event into the set of dotted counter paths
//! a document store has to increment, with every bucket computed in the
//! app's own timezone.
//!
//! ## Features
//!
//! - **Time contexts**: Resolve an event's instant from an optional client
//!   timestamp, clamping future values and ignoring malformed ones.
//! - **Prefix-nested keys**: `YYYY`, `YYYY.M`, `YYYY.M.D`, `YYYY.M.D.H`
//!   derived from a single local datetime.
//! - **Metric-aware fan-out**: Hourly counters only for flat metrics, weekly
//!   counters only for unique, frequency, loyalty, duration and messaging
//!   metrics.
//! - **Dotted paths**: Get/set/increment over nested `serde_json` documents.
//! - **Injectable clock**: Deterministic contexts with [`clock::FixedClock`].
//!
//! ## Example
//!
//! ```rust
//! use tzrollup_core::prelude::*;
//!
//! let tz = parse_tz("Europe/Berlin").unwrap();
//! let ts = ClientTimestamp::from("1710496800");
//! let ctx = TimeContext::build(tz, Some(&ts), &SystemClock);
//!
//! let increments = expand("u", None, &ctx.calendar_keys()).unwrap();
//! for (path, amount) in increments.iter() {
//!     println!("{path} += {amount}");
//! }
//! ```

pub mod clock;
pub mod codes;
pub mod context;
pub mod error;
pub mod expand;
pub mod increments;
pub mod models;
pub mod parse;
pub mod path;
pub mod tz;

// Re-export commonly used types at the crate root
pub use clock::{Clock, FixedClock, SystemClock};
pub use codes::{MetricCode, UserProperty};
pub use context::TimeContext;
pub use error::{Result, RollupError};
pub use expand::{expand, granularities_for, is_weekly_eligible};
pub use increments::IncrementSet;
pub use models::{CalendarKeys, Granularity};
pub use parse::{ClientTimestamp, parse_client_timestamp};
pub use path::FieldPath;

/// Prelude module for convenient imports.
///
/// ```
/// use tzrollup_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::codes::{MetricCode, UserProperty};
    pub use crate::context::TimeContext;
    pub use crate::error::{Result, RollupError};
    pub use crate::expand::{expand, granularities_for};
    pub use crate::increments::IncrementSet;
    pub use crate::models::*;
    pub use crate::parse::ClientTimestamp;
    pub use crate::path::FieldPath;
    pub use crate::tz::parse_tz;
}
