use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{system_now, Vault};
use crate::error::{MindsparkError, Result};
use crate::note::{NoteFile, MARKDOWN_EXTENSION};

/// Vault backed by a directory of markdown files
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn to_millis(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp_millis()
}

/// Creation time, falling back to modification time, then the epoch
fn created_millis(entry: &DirEntry) -> i64 {
    entry
        .metadata()
        .ok()
        .and_then(|meta| meta.created().or_else(|_| meta.modified()).ok())
        .map_or(0, to_millis)
}

impl FsVault {
    /// Open the vault rooted at `root`
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(MindsparkError::VaultNotFound {
                path: root.to_path_buf(),
            });
        }
        Ok(FsVault {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Vault-relative path with `/` separators
    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (!parts.is_empty()).then(|| parts.join("/"))
    }

    fn walk(&self) -> impl Iterator<Item = DirEntry> + '_ {
        WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "skipping unreadable vault entry");
                    None
                }
            })
    }
}

impl Vault for FsVault {
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn list_notes(&self) -> Result<Vec<NoteFile>> {
        let mut notes: Vec<NoteFile> = self
            .walk()
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == MARKDOWN_EXTENSION)
            })
            .filter_map(|entry| {
                let path = self.relative_path(entry.path())?;
                Some(NoteFile::new(path, created_millis(&entry)))
            })
            .collect();

        notes.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(count = notes.len(), "listed notes");
        Ok(notes)
    }

    fn read_content(&self, path: &str) -> Result<String> {
        let full = self.root.join(path);
        if !full.is_file() {
            return Err(MindsparkError::NoteNotFound {
                path: path.to_string(),
            });
        }
        fs::read_to_string(&full).map_err(|e| MindsparkError::io_operation("read", path, e))
    }

    fn now(&self) -> i64 {
        system_now()
    }

    fn list_folders(&self) -> Result<Vec<String>> {
        let mut folders: Vec<String> = self
            .walk()
            .filter(|entry| entry.depth() > 0 && entry.file_type().is_dir())
            .filter_map(|entry| self.relative_path(entry.path()))
            .collect();
        folders.sort();
        Ok(folders)
    }
}
