//! Client timestamp acceptance.
//!
//! Events may carry a client-side timestamp in epoch seconds. It is only
//! trusted when its decimal form is exactly 10 characters long and made of
//! digits with an optional leading sign and decimal point; anything else is
//! ignored in favor of the server clock. A trusted timestamp that lies in the future is clamped to now.

use std::borrow::Cow;

use tracing::debug;

/// Required length of the decimal form of an accepted timestamp.
pub const TIMESTAMP_LEN: usize = 10;

/// A raw client timestamp as it arrived on the request.
///
/// Numbers are coerced to their decimal string form before checking, so
/// `1710496800` and `"1710496800"` are accepted identically.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientTimestamp<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Float(f64),
}

impl ClientTimestamp<'_> {
    /// The decimal string form used for validation.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ClientTimestamp::Text(s) => Cow::Borrowed(s.as_ref()),
            ClientTimestamp::Integer(n) => Cow::Owned(n.to_string()),
            ClientTimestamp::Float(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl<'a> From<&'a str> for ClientTimestamp<'a> {
    fn from(s: &'a str) -> Self {
        ClientTimestamp::Text(Cow::Borrowed(s))
    }
}

impl From<String> for ClientTimestamp<'_> {
    fn from(s: String) -> Self {
        ClientTimestamp::Text(Cow::Owned(s))
    }
}

impl From<i64> for ClientTimestamp<'_> {
    fn from(n: i64) -> Self {
        ClientTimestamp::Integer(n)
    }
}

impl From<f64> for ClientTimestamp<'_> {
    fn from(n: f64) -> Self {
        ClientTimestamp::Float(n)
    }
}

/// Parse a client timestamp into epoch seconds.
///
/// Returns `None` when the value is not exactly [`TIMESTAMP_LEN`]
/// characters or is not plain decimal notation. Exponent forms such as
/// `1.7105e+09` are rejected. Fractional values are truncated toward zero.
///
/// # Examples
///
/// ```
/// use tzrollup_core::parse::{ClientTimestamp, parse_client_timestamp};
///
/// assert_eq!(parse_client_timestamp(&ClientTimestamp::from("1710496800")), Some(1710496800));
/// assert_eq!(parse_client_timestamp(&ClientTimestamp::from("1710496800000")), None);
/// ```
pub fn parse_client_timestamp(raw: &ClientTimestamp<'_>) -> Option<i64> {
    let text = raw.as_text();

    if text.chars().count() != TIMESTAMP_LEN || !is_plain_decimal(&text) {
        return None;
    }

    let value: f64 = text.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(value.trunc() as i64)
}

fn is_plain_decimal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut dots = 0;
    let mut digits = 0;
    for b in unsigned.bytes() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

/// Resolve the authoritative event time in epoch seconds.
///
/// Unusable input falls back to `now`; future input is clamped to `now`.
/// Neither case is an error.
pub fn resolve_timestamp(raw: Option<&ClientTimestamp<'_>>, now: i64) -> i64 {
    let Some(raw) = raw else {
        return now;
    };

    match parse_client_timestamp(raw) {
        Some(ts) if ts > now => {
            debug!(client = ts, now, "client timestamp is in the future, clamping");
            now
        }
        Some(ts) => ts,
        None => {
            debug!(raw = %raw.as_text(), "ignoring unusable client timestamp");
            now
        }
    }
}
