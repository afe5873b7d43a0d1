//! Command implementations for all mindspark commands

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use mindspark_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        dispatch_command::execute(self, ctx)
    }
}

pub(super) mod dispatch_command {
    use super::*;

    use crate::commands::{config, folders, history, spark};
    use mindspark_core::bail_usage;

    pub(super) fn execute(cmd: &Commands, ctx: &CommandContext) -> Result<()> {
        match cmd {
            Commands::Open => execute_open(ctx),
            Commands::Spark { count } => execute_spark(ctx, *count),
            Commands::History { clear } => execute_history(ctx, *clear),
            Commands::Exclude { folder } => execute_toggle(ctx, folder, false),
            Commands::Include { folder } => execute_toggle(ctx, folder, true),
            Commands::Folders => execute_folders(ctx),
            Commands::Config {
                note_count,
                refresh_on_open,
                dismiss_onboarding,
            } => execute_config(
                ctx,
                config::ConfigChanges {
                    note_count: *note_count,
                    refresh_on_open: *refresh_on_open,
                    dismiss_onboarding: *dismiss_onboarding,
                },
            ),
        }
    }

    fn execute_open(ctx: &CommandContext) -> Result<()> {
        let mut session = ctx.open_session()?;
        let batch = session.open(&mut rand::thread_rng())?;
        ctx.save(&session)?;
        spark::output(ctx.cli, &batch, session.data().settings.onboarding_dismissed)
    }

    fn execute_spark(ctx: &CommandContext, count: Option<usize>) -> Result<()> {
        if count == Some(0) {
            bail_usage!("--count must be at least 1");
        }

        let mut session = ctx.open_session()?;
        let mut rng = rand::thread_rng();
        let batch = match count {
            Some(count) => session.refresh_with_count(count, &mut rng)?,
            None => session.refresh(&mut rng)?,
        };
        ctx.save(&session)?;
        // `spark` is an explicit draw, the first-run hint belongs to `open`
        spark::output(ctx.cli, &batch, true)
    }

    fn execute_history(ctx: &CommandContext, clear: bool) -> Result<()> {
        let mut session = ctx.open_session()?;
        if clear {
            let cleared = session.data().view_history.len();
            session.clear_history();
            ctx.save(&session)?;
            history::output_cleared(ctx.cli, cleared)
        } else {
            history::output(ctx.cli, &session.data().view_history)
        }
    }

    fn execute_toggle(ctx: &CommandContext, folder: &str, include: bool) -> Result<()> {
        folders::validate_folder(folder)?;

        let mut session = ctx.open_session()?;
        session.toggle_folder(folder, include);
        ctx.save(&session)?;
        let excluded = &session.data().settings.excluded_folders;
        folders::output_toggled(ctx.cli, folder, include, excluded)
    }

    fn execute_folders(ctx: &CommandContext) -> Result<()> {
        let session = ctx.open_session()?;
        let tree = session.folder_tree()?;
        folders::output_tree(ctx.cli, &tree)
    }

    fn execute_config(ctx: &CommandContext, changes: config::ConfigChanges) -> Result<()> {
        let mut session = ctx.open_session()?;
        if changes.is_empty() {
            return config::output(ctx.cli, &session.data().settings);
        }

        config::apply(&mut session, &changes)?;
        ctx.save(&session)?;
        config::output(ctx.cli, &session.data().settings)
    }
}
