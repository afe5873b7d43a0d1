//! CLI argument parsing for mindspark
//!
//! Uses clap for argument parsing.
//! Supports global flags: --vault, --data, --format, --quiet, --verbose

pub mod output;
pub mod paths;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

use mindspark_core::error::MindsparkError;

pub use output::OutputFormat;

/// MindSpark - resurface a weighted random batch of your older notes
#[derive(Parser, Debug)]
#[command(name = "mindspark")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault directory holding the markdown notes
    #[arg(long, global = true, env = "MINDSPARK_VAULT")]
    pub vault: Option<PathBuf>,

    /// Data file (default: <vault>/.mindspark/data.json)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or a full filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the panel: a fresh batch or the previous one, per settings
    Open,

    /// Draw a fresh batch of notes
    Spark {
        /// Number of notes for this draw only (default: configured note count)
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Show view history
    History {
        /// Forget all view history and the last batch
        #[arg(long)]
        clear: bool,
    },

    /// Exclude a folder and its subfolders from selection
    Exclude {
        /// Vault-relative folder path
        folder: String,
    },

    /// Include a previously excluded folder again
    Include {
        /// Vault-relative folder path
        folder: String,
    },

    /// List vault folders with their exclusion state
    Folders,

    /// Show or change settings
    Config {
        /// Notes per batch (3-10)
        #[arg(long)]
        note_count: Option<usize>,

        /// Draw a new batch on every `open`
        #[arg(long, value_name = "BOOL")]
        refresh_on_open: Option<bool>,

        /// Stop showing the first-run hint
        #[arg(long)]
        dismiss_onboarding: bool,
    },
}

/// Output format asked for on the command line, read leniently so it is
/// known even when the arguments as a whole failed to parse.
pub fn requested_format<I, T>(args: I) -> OutputFormat
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::command()
        .ignore_errors(true)
        .try_get_matches_from(args)
        .ok()
        .and_then(|matches| matches.get_one::<OutputFormat>("format").copied())
        .unwrap_or_default()
}

/// Usage error for a failed parse, or `None` when clap is only printing
/// help or the version.
pub fn parse_failure(err: &clap::Error) -> Option<MindsparkError> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => Some(MindsparkError::UsageError(err.to_string())),
    }
}
