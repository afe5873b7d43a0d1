//! `mindspark open` and `mindspark spark` - show a batch of notes

use serde_json::json;

use crate::cli::{Cli, OutputFormat};
use mindspark_core::error::Result;
use mindspark_core::session::{Batch, NoteCard};

/// First-run hint shown by `open` until dismissed
pub const ONBOARDING_HINT: &str =
    "MindSpark resurfaces notes from your past so you can reconnect with old ideas.";

const DISMISS_HINT: &str = "Run `mindspark config --dismiss-onboarding` to hide this message.";

pub const EMPTY_LIBRARY_MESSAGE: &str = "No notes in this vault yet";

pub const ALL_EXCLUDED_MESSAGE: &str =
    "Every note is in an excluded folder, check `mindspark folders`";

/// Print a batch in the requested format
pub fn output(cli: &Cli, batch: &Batch, onboarding_dismissed: bool) -> Result<()> {
    match cli.format {
        OutputFormat::Json => output_json(batch, onboarding_dismissed)?,
        OutputFormat::Human => output_human(cli, batch, onboarding_dismissed),
    }
    Ok(())
}

fn status(batch: &Batch) -> &'static str {
    match batch {
        Batch::EmptyLibrary => "empty_library",
        Batch::AllExcluded => "all_excluded",
        Batch::Drawn(_) => "drawn",
        Batch::Restored(_) => "restored",
    }
}

fn output_json(batch: &Batch, onboarding_dismissed: bool) -> Result<()> {
    let output = json!({
        "status": status(batch),
        "onboarding": !onboarding_dismissed,
        "notes": batch.cards(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_human(cli: &Cli, batch: &Batch, onboarding_dismissed: bool) {
    if !onboarding_dismissed && !cli.quiet {
        println!("{}", ONBOARDING_HINT);
        println!("{}", DISMISS_HINT);
        println!();
    }

    match batch {
        Batch::EmptyLibrary => println!("{}", EMPTY_LIBRARY_MESSAGE),
        Batch::AllExcluded => println!("{}", ALL_EXCLUDED_MESSAGE),
        Batch::Drawn(cards) | Batch::Restored(cards) => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_card(cli, card);
            }
        }
    }
}

fn print_card(cli: &Cli, card: &NoteCard) {
    println!("{}", card.title);
    if !cli.quiet {
        println!("  {}", card.path);
    }
    println!("  {}", card.preview);
}
