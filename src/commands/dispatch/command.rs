//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::paths::resolve_data_path;
use crate::cli::Cli;
use mindspark_core::data::SparkData;
use mindspark_core::error::Result;
use mindspark_core::session::Session;
use mindspark_core::vault::FsVault;
use tracing::debug;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub vault_root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, vault_root: &'a PathBuf, start: Instant) -> Self {
        Self {
            cli,
            vault_root,
            start,
        }
    }

    pub fn data_path(&self) -> PathBuf {
        resolve_data_path(self.cli.data.as_deref(), self.vault_root)
    }

    /// Open the vault and load the persisted data into a session
    pub fn open_session(&self) -> Result<Session<FsVault>> {
        let vault = FsVault::open(self.vault_root)?;
        let data = SparkData::load(&self.data_path())?;
        debug!(elapsed = ?self.start.elapsed(), "open_session");
        Ok(Session::new(vault, data))
    }

    /// Write the session's data back to disk
    pub fn save(&self, session: &Session<FsVault>) -> Result<()> {
        let path = self.data_path();
        session.data().save(&path)?;
        debug!(elapsed = ?self.start.elapsed(), "save");
        Ok(())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("mindspark {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Resurfaces a weighted random batch of your older notes.");
        println!();
        println!("Run `mindspark --help` for usage information.");
        Ok(())
    }
}
