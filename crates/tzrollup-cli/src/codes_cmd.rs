use std::process::ExitCode;

use serde::Serialize;
use tzrollup_core::{MetricCode, UserProperty};

use crate::cli::CodesArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::to_json_pretty;

#[derive(Debug, Serialize)]
struct CodeEntry {
    name: &'static str,
    code: &'static str,
}

pub fn run_codes(args: CodesArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let entries: Vec<CodeEntry> = match args.kind.to_lowercase().as_str() {
        "metric" => MetricCode::ALL
            .iter()
            .map(|m| CodeEntry {
                name: m.name(),
                code: m.code(),
            })
            .collect(),
        "user" => UserProperty::ALL
            .iter()
            .map(|p| CodeEntry {
                name: p.name(),
                code: p.code(),
            })
            .collect(),
        _ => {
            return Err(CliError::input(format!(
                "Invalid kind '{}'. Expected: metric, user",
                args.kind
            )));
        }
    };

    match output_format {
        OutputFormat::Json => println!("{}", to_json_pretty(&entries)?),
        OutputFormat::Text => {
            for entry in &entries {
                println!("{} -> {}", entry.name, entry.code);
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
