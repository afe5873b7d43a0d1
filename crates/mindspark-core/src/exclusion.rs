//! Folder exclusion and note eligibility
//!
//! Folder paths are compared after normalization: surrounding whitespace is
//! trimmed, backslashes become `/`, leading and trailing slashes are removed
//! and the result is lowercased.
//!
//! A note is excluded when its path is the folder itself, lives under it,
//! or contains `/<folder>/` anywhere. The last rule also hides same-named
//! directories nested elsewhere in the vault (excluding `foo` hides
//! `notes/foo/x.md`); it is kept as-is because existing vault setups rely on
//! it.

use serde::{Deserialize, Serialize};

use crate::note::NoteFile;

/// Normalize a folder path for comparison
pub fn normalize_folder(folder: &str) -> String {
    folder
        .trim()
        .replace('\\', "/")
        .trim_matches('/')
        .to_lowercase()
}

fn normalize_note_path(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

/// Clean up a folder as typed by the user without changing its case
fn tidy_folder(folder: &str) -> String {
    folder.trim().replace('\\', "/").trim_matches('/').to_string()
}

fn is_strict_descendant(folder: &str, ancestor: &str) -> bool {
    folder.len() > ancestor.len()
        && folder.starts_with(ancestor)
        && folder.as_bytes()[ancestor.len()] == b'/'
}

fn path_matches_folder(normalized_path: &str, folder: &str) -> bool {
    normalized_path == folder
        || normalized_path.starts_with(&format!("{folder}/"))
        || normalized_path.contains(&format!("/{folder}/"))
}

/// Keep the markdown notes that are not inside an excluded folder.
///
/// Order is preserved. Blank folder entries are ignored.
pub fn filter_files<S: AsRef<str>>(notes: &[NoteFile], excluded_folders: &[S]) -> Vec<NoteFile> {
    let excludes: Vec<String> = excluded_folders
        .iter()
        .map(|folder| normalize_folder(folder.as_ref()))
        .filter(|folder| !folder.is_empty())
        .collect();

    notes
        .iter()
        .filter(|note| note.is_markdown())
        .filter(|note| {
            let path = normalize_note_path(&note.path);
            !excludes
                .iter()
                .any(|folder| path_matches_folder(&path, folder))
        })
        .cloned()
        .collect()
}

/// Ordered list of excluded folders as configured by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    folders: Vec<String>,
}

impl ExclusionSet {
    pub fn new(folders: Vec<String>) -> Self {
        ExclusionSet { folders }
    }

    /// Folders as stored
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    /// Eligible subset of `notes`, see [`filter_files`]
    pub fn filter(&self, notes: &[NoteFile]) -> Vec<NoteFile> {
        filter_files(notes, &self.folders)
    }

    /// Whether `folder` itself is listed
    pub fn is_explicitly_excluded(&self, folder: &str) -> bool {
        let folder = normalize_folder(folder);
        self.folders
            .iter()
            .any(|excluded| normalize_folder(excluded) == folder)
    }

    /// Whether an ancestor of `folder` is listed
    pub fn is_parent_excluded(&self, folder: &str) -> bool {
        let folder = normalize_folder(folder);
        self.folders.iter().any(|excluded| {
            let excluded = normalize_folder(excluded);
            !excluded.is_empty() && is_strict_descendant(&folder, &excluded)
        })
    }

    pub fn is_effectively_excluded(&self, folder: &str) -> bool {
        self.is_explicitly_excluded(folder) || self.is_parent_excluded(folder)
    }

    /// Include or exclude a folder.
    ///
    /// Excluding a folder drops explicit entries for its descendants, which
    /// the new entry already covers.
    pub fn toggle(&self, folder: &str, include: bool) -> ExclusionSet {
        let target = normalize_folder(folder);

        let mut folders: Vec<String> = self
            .folders
            .iter()
            .filter(|excluded| normalize_folder(excluded) != target)
            .cloned()
            .collect();

        if !include && !target.is_empty() {
            folders.retain(|excluded| !is_strict_descendant(&normalize_folder(excluded), &target));
            folders.push(tidy_folder(folder));
        }

        ExclusionSet { folders }
    }

    /// Drop blank entries, duplicates, and entries covered by an ancestor
    pub fn prune_redundant(&self) -> ExclusionSet {
        let normalized: Vec<String> = self.folders.iter().map(|f| normalize_folder(f)).collect();

        let mut seen: Vec<&str> = Vec::new();
        let mut folders = Vec::new();
        for (folder, norm) in self.folders.iter().zip(&normalized) {
            if norm.is_empty() || seen.contains(&norm.as_str()) {
                continue;
            }
            let covered = normalized
                .iter()
                .any(|other| !other.is_empty() && is_strict_descendant(norm, other));
            if covered {
                continue;
            }
            seen.push(norm);
            folders.push(folder.clone());
        }

        ExclusionSet { folders }
    }
}

impl From<Vec<String>> for ExclusionSet {
    fn from(folders: Vec<String>) -> Self {
        ExclusionSet::new(folders)
    }
}
