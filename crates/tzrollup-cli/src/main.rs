use std::process::ExitCode;

use clap::Parser;

mod cli;
mod codes_cmd;
mod context_cmd;
mod dot_cmd;
mod error;
mod expand_cmd;
mod logging;
mod shared;

use cli::{Cli, Commands};
use codes_cmd::run_codes;
use context_cmd::run_context;
use dot_cmd::run_dot;
use error::{CliResult, OutputFormat, render_error};
use expand_cmd::run_expand;
use tracing::debug;

fn dispatch<A>(
    args: A,
    output_format: &str,
    run: fn(A, OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let output_format = match output_format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(err) => return render_error(&err, OutputFormat::Text),
    };

    match run(args, output_format) {
        Ok(code) => code,
        Err(err) => render_error(&err, output_format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: {e:#}");
    }
    debug!("Parsed CLI args: {:?}", cli);

    match cli.command {
        Commands::Context(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_context)
        }
        Commands::Expand(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_expand)
        }
        Commands::Codes(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_codes)
        }
        Commands::Dot(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_dot)
        }
    }
}
