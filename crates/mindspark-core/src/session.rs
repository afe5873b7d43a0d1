//! Session: the state a front end keeps between draws
//!
//! A [`Session`] owns a vault handle and the current [`SparkData`]. Drawing a
//! batch selects notes, reads them into [`NoteCard`]s and records every card
//! that was built as shown. The caller decides when to persist
//! [`Session::data`].

use std::collections::HashMap;
use std::time::Instant;

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::validate_note_count;
use crate::data::{clear_history, record_note_shown, SparkData};
use crate::error::Result;
use crate::note::NoteFile;
use crate::select::select_notes;
use crate::text::{get_note_title, get_preview};
use crate::trace_time;
use crate::vault::Vault;

/// Maximum preview length on a card, in characters
pub const PREVIEW_LENGTH: usize = 180;

/// Preview shown for notes without any text
pub const EMPTY_PREVIEW: &str = "(empty note)";

/// A note ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteCard {
    pub path: String,
    pub title: String,
    pub preview: String,
}

/// Outcome of drawing or restoring a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// The vault has no notes at all
    EmptyLibrary,
    /// Every note is inside an excluded folder
    AllExcluded,
    /// A freshly drawn batch; these notes were recorded as shown
    Drawn(Vec<NoteCard>),
    /// The previous batch, shown again without touching history
    Restored(Vec<NoteCard>),
}

impl Batch {
    pub fn cards(&self) -> &[NoteCard] {
        match self {
            Batch::Drawn(cards) | Batch::Restored(cards) => cards,
            Batch::EmptyLibrary | Batch::AllExcluded => &[],
        }
    }
}

/// A folder of the vault with its exclusion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub path: String,
    pub name: String,
    /// 1 for top-level folders
    pub depth: usize,
    pub explicitly_excluded: bool,
    /// Covered by an excluded ancestor; toggling has no effect
    pub parent_excluded: bool,
}

impl FolderEntry {
    pub fn is_excluded(&self) -> bool {
        self.explicitly_excluded || self.parent_excluded
    }
}

/// Vault plus persisted data
#[derive(Debug)]
pub struct Session<V: Vault> {
    vault: V,
    data: SparkData,
}

impl<V: Vault> Session<V> {
    pub fn new(vault: V, data: SparkData) -> Self {
        Session { vault, data }
    }

    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn data(&self) -> &SparkData {
        &self.data
    }

    /// Read a note and turn it into a card
    pub fn render_card(&self, note: &NoteFile) -> Result<NoteCard> {
        let content = self.vault.read_content(&note.path)?;
        let preview = get_preview(&content, PREVIEW_LENGTH);

        Ok(NoteCard {
            path: note.path.clone(),
            title: get_note_title(&note.basename, &content),
            preview: if preview.is_empty() {
                EMPTY_PREVIEW.to_string()
            } else {
                preview
            },
        })
    }

    /// Build cards, skipping notes that cannot be read
    fn render_cards(&self, notes: &[NoteFile]) -> Vec<(NoteFile, NoteCard)> {
        notes
            .iter()
            .filter_map(|note| match self.render_card(note) {
                Ok(card) => Some((note.clone(), card)),
                Err(e) => {
                    warn!(path = %note.path, error = %e, "failed to render note");
                    None
                }
            })
            .collect()
    }

    /// Draw a new batch of the configured size
    pub fn refresh<R: Rng>(&mut self, rng: &mut R) -> Result<Batch> {
        self.refresh_with_count(self.data.settings.note_count, rng)
    }

    /// Draw a new batch of `count` notes.
    ///
    /// The drawn paths become the last shown batch; each note whose card
    /// could be built is recorded as shown.
    pub fn refresh_with_count<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<Batch> {
        let start = Instant::now();
        let notes = self.vault.list_notes()?;

        if notes.is_empty() {
            debug!("vault has no notes");
            return Ok(Batch::EmptyLibrary);
        }

        let excluded = &self.data.settings.excluded_folders;
        if excluded.filter(&notes).is_empty() {
            debug!(total = notes.len(), "every note is excluded");
            return Ok(Batch::AllExcluded);
        }

        let now = self.vault.now();
        let selected = select_notes(
            &notes,
            &self.data.view_history,
            excluded.folders(),
            count,
            now,
            rng,
        );

        self.data.last_shown_paths = selected.iter().map(|note| note.path.clone()).collect();

        let rendered = self.render_cards(&selected);
        let mut cards = Vec::with_capacity(rendered.len());
        for (note, card) in rendered {
            self.data = record_note_shown(&self.data, &note.path, now);
            cards.push(card);
        }

        trace_time!(start, "refresh", shown = cards.len());
        Ok(Batch::Drawn(cards))
    }

    /// Show the last batch again, or draw a new one if nothing of it is left.
    ///
    /// Restored notes still have to exist and pass the current exclusions.
    pub fn restore_or_refresh<R: Rng>(&mut self, rng: &mut R) -> Result<Batch> {
        let notes = self.vault.list_notes()?;
        let by_path: HashMap<&str, &NoteFile> =
            notes.iter().map(|note| (note.path.as_str(), note)).collect();

        let restored: Vec<NoteFile> = self
            .data
            .last_shown_paths
            .iter()
            .filter_map(|path| by_path.get(path.as_str()).map(|note| (*note).clone()))
            .collect();

        if restored.is_empty() {
            debug!("nothing to restore, drawing a new batch");
            return self.refresh(rng);
        }

        let visible = self.data.settings.excluded_folders.filter(&restored);
        let cards: Vec<NoteCard> = self
            .render_cards(&visible)
            .into_iter()
            .map(|(_, card)| card)
            .collect();

        if cards.is_empty() {
            debug!("restored batch is fully hidden, drawing a new batch");
            return self.refresh(rng);
        }

        Ok(Batch::Restored(cards))
    }

    /// Panel-open behavior: fresh draw or restore, per settings
    pub fn open<R: Rng>(&mut self, rng: &mut R) -> Result<Batch> {
        if self.data.settings.refresh_on_open {
            self.refresh(rng)
        } else {
            self.restore_or_refresh(rng)
        }
    }

    pub fn dismiss_onboarding(&mut self) {
        self.data.settings.onboarding_dismissed = true;
    }

    /// Set the batch size; must be within the configurable range
    pub fn set_note_count(&mut self, count: usize) -> Result<()> {
        self.data.settings.note_count = validate_note_count(count)?;
        Ok(())
    }

    pub fn set_refresh_on_open(&mut self, refresh_on_open: bool) {
        self.data.settings.refresh_on_open = refresh_on_open;
    }

    /// Include or exclude a folder, see [`crate::exclusion::ExclusionSet::toggle`]
    pub fn toggle_folder(&mut self, folder: &str, include: bool) {
        self.data.settings.excluded_folders =
            self.data.settings.excluded_folders.toggle(folder, include);
    }

    /// Forget all view history and the last batch
    pub fn clear_history(&mut self) {
        self.data = clear_history(&self.data);
    }

    /// Folders of the vault, depth-first, with their exclusion state
    pub fn folder_tree(&self) -> Result<Vec<FolderEntry>> {
        let excluded = &self.data.settings.excluded_folders;
        let mut folders = self.vault.list_folders()?;
        // Compare segment by segment so children directly follow their parent
        folders.sort_by(|a, b| {
            a.split('/')
                .map(str::to_lowercase)
                .cmp(b.split('/').map(str::to_lowercase))
        });

        Ok(folders
            .into_iter()
            .map(|path| {
                let name = path.rsplit('/').next().unwrap_or(&path).to_string();
                FolderEntry {
                    depth: path.split('/').count(),
                    explicitly_excluded: excluded.is_explicitly_excluded(&path),
                    parent_excluded: excluded.is_parent_excluded(&path),
                    name,
                    path,
                }
            })
            .collect())
    }
}
