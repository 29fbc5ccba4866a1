//! Error types for tzrollup-core.
//!
//! Timestamp anomalies are not errors: the context builder recovers from
//! them locally. What remains are configuration mistakes (bad timezone
//! names), integration defects (a calendar context missing a field) and
//! conflicts while merging or applying increments.

use thiserror::Error;

/// The main error type for tzrollup operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RollupError {
    /// Invalid timezone name provided.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A calendar context is missing one of its five fields.
    #[error("Malformed time context: missing '{0}'")]
    MalformedContext(&'static str),

    /// An intermediate path segment exists but is not an object.
    #[error("Path conflict at '{0}': intermediate value is not an object")]
    PathConflict(String),

    /// The increment target exists but does not hold a number.
    #[error("Cannot increment non-numeric field '{0}'")]
    NonNumericField(String),

    /// Summing increments for a path exceeded the `i64` range.
    #[error("Increment overflow at '{0}'")]
    IncrementOverflow(String),

    /// Error parsing user-supplied input (metric names, user properties).
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type alias for tzrollup operations.
pub type Result<T> = std::result::Result<T, RollupError>;
