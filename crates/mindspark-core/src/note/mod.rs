//! Note references as seen by the selection engine
//!
//! A [`NoteFile`] only carries what selection needs: the vault-relative
//! path, the extension, the basename used as a fallback title, and the
//! creation time. Content is read on demand through the vault.

use serde::{Deserialize, Serialize};

/// Extension of notes eligible for selection
pub const MARKDOWN_EXTENSION: &str = "md";

/// A note in the vault, referenced by path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteFile {
    /// Vault-relative path with `/` separators, e.g. `Archive/2024/x.md`
    pub path: String,
    /// File extension without the dot
    pub extension: String,
    /// File name without the extension
    pub basename: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created: i64,
}

impl NoteFile {
    /// Build a note reference from a vault-relative path.
    ///
    /// Backslashes are normalized to `/`; extension and basename are derived
    /// from the last path segment.
    pub fn new(path: impl Into<String>, created: i64) -> Self {
        let path = path.into().replace('\\', "/");
        let file_name = path.rsplit('/').next().unwrap_or(&path);

        let (basename, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), ext.to_string()),
            _ => (file_name.to_string(), String::new()),
        };

        NoteFile {
            path,
            extension,
            basename,
            created,
        }
    }

    /// Whether this note is a markdown note
    pub fn is_markdown(&self) -> bool {
        self.extension == MARKDOWN_EXTENSION
    }

    /// Folder part of the path, empty for notes at the vault root
    pub fn folder(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(folder, _)| folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_name_parts() {
        let note = NoteFile::new("Archive/2024/old idea.md", 42);
        assert_eq!(note.basename, "old idea");
        assert_eq!(note.extension, "md");
        assert_eq!(note.folder(), "Archive/2024");
        assert_eq!(note.created, 42);
        assert!(note.is_markdown());
    }

    #[test]
    fn test_new_normalizes_backslashes() {
        let note = NoteFile::new("Projects\\plan.md", 0);
        assert_eq!(note.path, "Projects/plan.md");
        assert_eq!(note.folder(), "Projects");
    }

    #[test]
    fn test_new_without_extension() {
        let note = NoteFile::new(".hidden", 0);
        assert_eq!(note.basename, ".hidden");
        assert_eq!(note.extension, "");
        assert!(!note.is_markdown());
        assert_eq!(note.folder(), "");
    }

    #[test]
    fn test_non_markdown_extension() {
        let note = NoteFile::new("img/photo.png", 0);
        assert!(!note.is_markdown());
        assert_eq!(note.basename, "photo");
    }
}
