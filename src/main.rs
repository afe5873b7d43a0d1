//! MindSpark - resurface forgotten notes
//!
//! Draws a weighted random batch of markdown notes from a vault, favoring
//! notes never shown and notes not seen for a while, and remembers what was
//! shown between runs.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use mindspark_core::error::MindsparkError;
use mindspark_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_parse_failure(err),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&cli, &e),
    }
}

/// Bad arguments under `--format json` still produce an error envelope
fn report_parse_failure(err: clap::Error) -> ExitCode {
    match cli::parse_failure(&err) {
        Some(error) if cli::requested_format(env::args_os()) == OutputFormat::Json => {
            eprintln!("{}", error.to_json());
            exit_code(&error)
        }
        _ => err.exit(),
    }
}

fn report_error(cli: &Cli, error: &MindsparkError) -> ExitCode {
    match cli.format {
        OutputFormat::Json => eprintln!("{}", error.to_json()),
        OutputFormat::Human if !cli.quiet => eprintln!("error: {}", error),
        OutputFormat::Human => {}
    }
    exit_code(error)
}

fn exit_code(error: &MindsparkError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}
