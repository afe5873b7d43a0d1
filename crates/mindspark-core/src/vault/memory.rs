use std::cell::Cell;
use std::collections::{BTreeMap, HashSet};

use super::Vault;
use crate::error::{MindsparkError, Result};
use crate::note::NoteFile;

/// In-memory vault with a controllable clock
#[derive(Debug, Default)]
pub struct MemoryVault {
    notes: BTreeMap<String, (NoteFile, String)>,
    unreadable: HashSet<String>,
    now: Cell<i64>,
}

impl MemoryVault {
    pub fn new(now: i64) -> Self {
        MemoryVault {
            now: Cell::new(now),
            ..Default::default()
        }
    }

    /// Add a note created at `created` with the given content
    pub fn with_note(mut self, path: &str, created: i64, content: &str) -> Self {
        let note = NoteFile::new(path, created);
        self.notes
            .insert(note.path.clone(), (note, content.to_string()));
        self
    }

    /// Mark a note whose content cannot be read
    pub fn with_unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(path.to_string());
        self
    }

    /// Remove a note, as if deleted from disk
    pub fn remove(&mut self, path: &str) {
        self.notes.remove(path);
    }

    /// Move the clock to `now`
    pub fn set_now(&self, now: i64) {
        self.now.set(now);
    }
}

impl Vault for MemoryVault {
    fn list_notes(&self) -> Result<Vec<NoteFile>> {
        Ok(self.notes.values().map(|(note, _)| note.clone()).collect())
    }

    fn read_content(&self, path: &str) -> Result<String> {
        if self.unreadable.contains(path) {
            return Err(MindsparkError::io_operation("read", path, "unreadable"));
        }
        self.notes
            .get(path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| MindsparkError::NoteNotFound {
                path: path.to_string(),
            })
    }

    fn now(&self) -> i64 {
        self.now.get()
    }
}
