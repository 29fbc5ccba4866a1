use std::io::BufRead;
use std::process::ExitCode;

use serde::Serialize;
use tracing::debug;
use tzrollup_core::{CalendarKeys, Granularity, IncrementSet, expand, granularities_for};

use crate::cli::ExpandArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat};
use crate::shared::{build_context, open_input, to_json, to_json_pretty};

pub fn run_expand(args: ExpandArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let keys = resolve_keys(&args)?;
    let reader = open_input(&args.input)?;

    let mut merged = IncrementSet::new();
    let fold = args.merge || args.document;

    for line in reader.lines() {
        let line = line.map_err(|e| CliError::runtime(format!("Failed to read line: {}", e)))?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (property, increment) = parse_line(trimmed)?;
        let increments = expand(&property, increment, &keys)?;

        if fold {
            merged.merge(increments)?;
            continue;
        }

        match output_format {
            OutputFormat::Json => {
                let record = ExpandRecord {
                    granularities: granularities_for(&property),
                    property,
                    increments,
                };
                println!("{}", to_json(&record)?);
            }
            OutputFormat::Text => print_increments(&increments),
        }
    }

    if args.document {
        let mut document = serde_json::Value::Object(serde_json::Map::new());
        merged.apply_to(&mut document)?;
        match output_format {
            OutputFormat::Json => println!("{}", to_json_pretty(&document)?),
            OutputFormat::Text => println!("{}", to_json(&document)?),
        }
    } else if args.merge {
        debug!(entries = merged.len(), "merged increments");
        match output_format {
            OutputFormat::Json => println!("{}", to_json_pretty(&merged)?),
            OutputFormat::Text => print_increments(&merged),
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

#[derive(Debug, Serialize)]
struct ExpandRecord {
    property: String,
    granularities: Vec<Granularity>,
    increments: IncrementSet,
}

fn resolve_keys(args: &ExpandArgs) -> CliResult<CalendarKeys> {
    match &args.context {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| CliError::input(format!("Invalid context JSON: {}", e))),
        None => Ok(build_context(&args.time)?.calendar_keys()),
    }
}

fn parse_line(line: &str) -> CliResult<(String, Option<i64>)> {
    let mut parts = line.split_whitespace();

    let property = parts
        .next()
        .ok_or_else(|| CliError::input("Missing property"))?
        .to_string();

    let increment = parts
        .next()
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                CliError::input(format!(
                    "Invalid increment '{}' for '{}'. Expected integer value.",
                    raw, property
                ))
            })
        })
        .transpose()?;

    if let Some(extra) = parts.next() {
        return Err(CliError::input(format!(
            "Unexpected token '{}' in line '{}'. Expected: <property> [increment]",
            extra, line
        )));
    }

    Ok((property, increment))
}

fn print_increments(increments: &IncrementSet) {
    for (path, amount) in increments.iter() {
        println!("{} += {}", path, amount);
    }
}
