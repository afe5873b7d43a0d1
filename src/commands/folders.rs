//! `mindspark folders`, `exclude` and `include` - folder exclusion

use serde_json::json;

use crate::cli::{Cli, OutputFormat};
use mindspark_core::bail_usage;
use mindspark_core::error::Result;
use mindspark_core::exclusion::{normalize_folder, ExclusionSet};
use mindspark_core::session::FolderEntry;

/// Reject folder arguments that name no folder at all (blank, `/`)
pub fn validate_folder(folder: &str) -> Result<()> {
    if normalize_folder(folder).is_empty() {
        bail_usage!("folder must not be empty");
    }
    Ok(())
}

pub fn output_toggled(
    cli: &Cli,
    folder: &str,
    include: bool,
    excluded: &ExclusionSet,
) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let output = json!({
                "folder": folder,
                "excluded": !include,
                "excludedFolders": excluded.folders(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if cli.quiet {
                return Ok(());
            }
            if include {
                println!("Included {}", folder);
                if excluded.is_parent_excluded(folder) {
                    println!("Note: a parent folder is still excluded");
                }
            } else {
                println!("Excluded {}", folder);
            }
        }
    }
    Ok(())
}

fn status_label(entry: &FolderEntry) -> &'static str {
    if !entry.is_excluded() {
        ""
    } else if entry.explicitly_excluded {
        " [excluded]"
    } else {
        " [excluded by parent]"
    }
}

pub fn output_tree(cli: &Cli, tree: &[FolderEntry]) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(tree)?);
        }
        OutputFormat::Human => {
            if tree.is_empty() {
                if !cli.quiet {
                    println!("No folders found");
                }
                return Ok(());
            }

            for entry in tree {
                let indent = "  ".repeat(entry.depth.saturating_sub(1));
                println!("{}{}/{}", indent, entry.name, status_label(entry));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(explicitly_excluded: bool, parent_excluded: bool) -> FolderEntry {
        FolderEntry {
            path: "a/b".to_string(),
            name: "b".to_string(),
            depth: 2,
            explicitly_excluded,
            parent_excluded,
        }
    }

    #[test]
    fn test_validate_folder() {
        assert!(validate_folder("Archive").is_ok());
        assert!(validate_folder("  ").is_err());
        assert!(validate_folder("/").is_err());
    }

    #[test]
    fn test_status_label_prefers_explicit() {
        assert_eq!(status_label(&entry(true, true)), " [excluded]");
        assert_eq!(status_label(&entry(false, true)), " [excluded by parent]");
        assert_eq!(status_label(&entry(false, false)), "");
    }
}
