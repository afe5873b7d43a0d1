//! `mindspark history` command - inspect or clear view history

use chrono::{DateTime, SecondsFormat};
use serde_json::json;

use crate::cli::{Cli, OutputFormat};
use mindspark_core::error::Result;
use mindspark_core::history::{ViewHistory, ViewRecord};

/// Render a millisecond timestamp as RFC 3339, falling back to the raw value
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| millis.to_string())
}

/// Records ordered most recently shown first, then by path
fn sorted_records(history: &ViewHistory) -> Vec<(&str, &ViewRecord)> {
    let mut records: Vec<_> = history.iter().collect();
    records.sort_by(|a, b| b.1.last_shown.cmp(&a.1.last_shown).then(a.0.cmp(b.0)));
    records
}

pub fn output(cli: &Cli, history: &ViewHistory) -> Result<()> {
    let records = sorted_records(history);

    match cli.format {
        OutputFormat::Json => {
            let output: Vec<_> = records
                .iter()
                .map(|(path, record)| {
                    json!({
                        "path": path,
                        "showCount": record.show_count,
                        "lastShown": record.last_shown,
                        "lastShownAt": format_timestamp(record.last_shown),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if records.is_empty() {
                if !cli.quiet {
                    println!("No notes shown yet");
                }
                return Ok(());
            }

            for (path, record) in records {
                println!(
                    "{} (shown {}x, last {})",
                    path,
                    record.show_count,
                    format_timestamp(record.last_shown)
                );
            }
        }
    }
    Ok(())
}

pub fn output_cleared(cli: &Cli, cleared: usize) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "cleared": cleared }))?
            );
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!("Cleared view history ({} notes)", cleared);
            }
        }
    }
    Ok(())
}
