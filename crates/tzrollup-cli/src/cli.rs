use clap::{Parser, Subcommand};

/// Timezone-aware rollup counter keys
#[derive(Parser, Debug)]
#[command(name = "tzrollup")]
#[command(version, about = "Timezone-aware rollup counter keys")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve an event time and print its calendar buckets
    Context(ContextArgs),
    /// Expand metric properties into bucket increments
    Expand(ExpandArgs),
    /// List short-code dictionaries
    Codes(CodesArgs),
    /// Get or set a dotted path in a JSON document
    Dot(DotArgs),
}

#[derive(clap::Args, Debug)]
pub struct TimeArgs {
    /// IANA timezone of the app (e.g., Europe/Berlin)
    #[arg(short, long, default_value = "UTC")]
    pub tz: String,

    /// Client timestamp in epoch seconds (ignored unless 10 digits)
    #[arg(long, allow_hyphen_values = true)]
    pub timestamp: Option<String>,

    /// Override the current time (epoch seconds) for reproducible output
    #[arg(long, allow_hyphen_values = true)]
    pub now: Option<i64>,
}

#[derive(clap::Args, Debug)]
pub struct ContextArgs {
    #[command(flatten)]
    pub time: TimeArgs,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ExpandArgs {
    #[command(flatten)]
    pub time: TimeArgs,

    /// Calendar keys as JSON, used instead of building a context
    #[arg(long, conflicts_with_all = ["timestamp", "now"])]
    pub context: Option<String>,

    /// Input file with `<property> [increment]` lines (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Fold all lines into one increment set
    #[arg(long)]
    pub merge: bool,

    /// Apply the merged increments to an empty document and print it
    #[arg(long)]
    pub document: bool,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct CodesArgs {
    /// Dictionary: metric, user
    #[arg(short, long, default_value = "metric")]
    pub kind: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct DotArgs {
    /// Dotted path (e.g., 2024.3.u)
    #[arg(long)]
    pub path: String,

    /// JSON value to write at the path
    #[arg(long, allow_hyphen_values = true)]
    pub set: Option<String>,

    /// Input JSON document (use - for stdin)
    #[arg(long, default_value = "-")]
    pub input: String,

    /// Output format: json, text
    #[arg(long, default_value = "json")]
    pub output_format: String,
}
