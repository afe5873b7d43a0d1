//! Access to the notes mindspark selects from
//!
//! The engine only needs three things from its surroundings: the list of
//! notes, their content on demand, and the current time. [`Vault`] captures
//! exactly that so the session can run against a directory on disk
//! ([`FsVault`]) or an in-memory fixture ([`MemoryVault`]).

mod fs;
mod memory;

use std::collections::BTreeSet;

pub use fs::FsVault;
pub use memory::MemoryVault;

use crate::error::Result;
use crate::note::NoteFile;

/// Capability interface over a note collection
pub trait Vault {
    /// Every markdown note in the vault
    fn list_notes(&self) -> Result<Vec<NoteFile>>;

    /// Full text of the note at `path`
    fn read_content(&self, path: &str) -> Result<String>;

    /// Current time in milliseconds since the Unix epoch
    fn now(&self) -> i64;

    /// Every folder in the vault, sorted.
    ///
    /// The default derives folders from note paths, so empty folders are
    /// not reported.
    fn list_folders(&self) -> Result<Vec<String>> {
        Ok(folders_of(&self.list_notes()?))
    }
}

/// All folders and their ancestors that contain the given notes, sorted
pub fn folders_of(notes: &[NoteFile]) -> Vec<String> {
    let mut folders = BTreeSet::new();
    for note in notes {
        let mut folder = note.folder();
        while !folder.is_empty() {
            folders.insert(folder.to_string());
            folder = folder.rsplit_once('/').map_or("", |(parent, _)| parent);
        }
    }
    folders.into_iter().collect()
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn system_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
