use std::process::ExitCode;

use crate::cli::ContextArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{ContextView, build_context, to_json_pretty};

pub fn run_context(args: ContextArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let ctx = build_context(&args.time)?;
    let view = ContextView::from(&ctx);

    match output_format {
        OutputFormat::Json => println!("{}", to_json_pretty(&view)?),
        OutputFormat::Text => {
            println!("Timezone: {}", view.timezone);
            println!("Timestamp: {}", view.timestamp);
            println!("Local: {}", view.local);
            println!("UTC: {}", view.utc);
            println!("Now: {}", view.now_without_override);
            println!("Yearly: {}", view.yearly);
            println!("Monthly: {}", view.monthly);
            println!("Weekly: w{}", view.weekly);
            println!("Daily: {}", view.daily);
            println!("Hourly: {}", view.hourly);
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
