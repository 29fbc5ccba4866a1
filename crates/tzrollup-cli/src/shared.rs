use std::fs::File;
use std::io::{self, BufRead, BufReader};

use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;
use tzrollup_core::tz::{format_rfc3339, format_rfc3339_utc};
use tzrollup_core::{Clock, ClientTimestamp, FixedClock, SystemClock, TimeContext};

use crate::cli::TimeArgs;
use crate::error::{CliError, CliResult};

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    tzrollup_core::tz::parse_tz(name)
        .map_err(|e| CliError::input(format!("Invalid timezone '{}': {}", name, e)))
}

/// Build a context from the shared time flags.
pub fn build_context(args: &TimeArgs) -> CliResult<TimeContext> {
    let tz = parse_tz_or_input_error(&args.tz)?;
    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };
    let timestamp = args.timestamp.as_deref().map(ClientTimestamp::from);

    let ctx = TimeContext::build(tz, timestamp.as_ref(), clock.as_ref());
    debug!(tz = %tz, timestamp = ctx.timestamp(), "built time context");
    Ok(ctx)
}

pub fn open_input(path: &str) -> CliResult<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path)
        .map_err(|e| CliError::runtime(format!("Failed to open file '{}': {}", path, e)))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Serializable view of a [`TimeContext`].
#[derive(Debug, Serialize)]
pub struct ContextView {
    pub timezone: String,
    pub timestamp: i64,
    pub local: String,
    pub utc: String,
    pub now_without_override: String,
    pub yearly: String,
    pub monthly: String,
    pub weekly: u32,
    pub daily: String,
    pub hourly: String,
}

impl From<&TimeContext> for ContextView {
    fn from(ctx: &TimeContext) -> Self {
        ContextView {
            timezone: ctx.timezone().to_string(),
            timestamp: ctx.timestamp(),
            local: format_rfc3339(ctx.local()),
            utc: format_rfc3339_utc(ctx.utc()),
            now_without_override: format_rfc3339(ctx.now_without_override()),
            yearly: ctx.yearly().to_string(),
            monthly: ctx.monthly().to_string(),
            weekly: ctx.weekly(),
            daily: ctx.daily().to_string(),
            hourly: ctx.hourly().to_string(),
        }
    }
}

pub fn to_json_pretty<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))
}

pub fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string(value)
        .map_err(|e| CliError::runtime(format!("Failed to serialize JSON: {}", e)))
}
