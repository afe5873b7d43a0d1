//! `mindspark config` command - show or change settings

use crate::cli::{Cli, OutputFormat};
use mindspark_core::config::Settings;
use mindspark_core::error::Result;
use mindspark_core::session::Session;
use mindspark_core::vault::Vault;

/// Settings changes requested on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigChanges {
    pub note_count: Option<usize>,
    pub refresh_on_open: Option<bool>,
    pub dismiss_onboarding: bool,
}

impl ConfigChanges {
    pub fn is_empty(&self) -> bool {
        self.note_count.is_none() && self.refresh_on_open.is_none() && !self.dismiss_onboarding
    }
}

/// Apply every requested change, validating before anything is touched
pub fn apply<V: Vault>(session: &mut Session<V>, changes: &ConfigChanges) -> Result<()> {
    if let Some(count) = changes.note_count {
        session.set_note_count(count)?;
    }
    if let Some(refresh_on_open) = changes.refresh_on_open {
        session.set_refresh_on_open(refresh_on_open);
    }
    if changes.dismiss_onboarding {
        session.dismiss_onboarding();
    }
    Ok(())
}

pub fn output(cli: &Cli, settings: &Settings) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Human => {
            println!("note count:        {}", settings.note_count);
            println!("refresh on open:   {}", settings.refresh_on_open);
            println!("onboarding shown:  {}", !settings.onboarding_dismissed);
            if settings.excluded_folders.is_empty() {
                println!("excluded folders:  (none)");
            } else {
                println!("excluded folders:");
                for folder in settings.excluded_folders.folders() {
                    println!("  {}", folder);
                }
            }
        }
    }
    Ok(())
}
