use std::process::ExitCode;

use serde_json::Value;
use tzrollup_core::path;

use crate::cli::DotArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{open_input, to_json, to_json_pretty};

pub fn run_dot(args: DotArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let reader = open_input(&args.input)?;
    let mut document: Value = serde_json::from_reader(reader)
        .map_err(|e| CliError::input(format!("Invalid JSON document: {}", e)))?;

    let output = match &args.set {
        Some(raw) => {
            let value: Value = serde_json::from_str(raw)
                .map_err(|e| CliError::input(format!("Invalid JSON value '{}': {}", raw, e)))?;

            if path::set(&mut document, args.path.as_str(), value).is_none() {
                return Err(CliError::with_status(
                    format!("Parent of '{}' does not exist", args.path),
                    "absent",
                ));
            }
            document
        }
        None => path::get(&document, args.path.as_str())
            .cloned()
            .ok_or_else(|| {
                CliError::with_status(format!("Path '{}' not found", args.path), "absent")
            })?,
    };

    match output_format {
        OutputFormat::Json => println!("{}", to_json_pretty(&output)?),
        OutputFormat::Text => println!("{}", to_json(&output)?),
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
