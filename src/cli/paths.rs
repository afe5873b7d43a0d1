//! Path resolution utilities for CLI commands

use std::env;
use std::path::{Path, PathBuf};

use mindspark_core::data::default_data_path;

/// Resolve the vault root.
///
/// If a vault path is provided, returns it. Otherwise, falls back to the
/// current working directory, or "." if that cannot be determined.
pub fn resolve_vault_path(vault: Option<PathBuf>) -> PathBuf {
    vault.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve the data file: an explicit path wins, otherwise the default
/// location inside the vault.
pub fn resolve_data_path(data: Option<&Path>, vault_root: &Path) -> PathBuf {
    data.map_or_else(|| default_data_path(vault_root), Path::to_path_buf)
}
