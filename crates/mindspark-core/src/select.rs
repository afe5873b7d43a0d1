//! Note selection: filter, weight, sample
//!
//! [`select_notes`] is a pure function of its inputs. Recording the notes
//! that actually got shown is left to the caller (see
//! [`crate::session::Session`]).

use std::time::Instant;

use rand::Rng;
use tracing::debug;

use crate::exclusion::filter_files;
use crate::history::ViewHistory;
use crate::note::NoteFile;
use crate::sample::weighted_random_sample;
use crate::trace_time;
use crate::weight::compute_weight;

/// Pick up to `count` eligible notes, favouring unseen and older notes.
///
/// `now` is the current time in milliseconds since the Unix epoch.
pub fn select_notes<S: AsRef<str>, R: Rng>(
    notes: &[NoteFile],
    history: &ViewHistory,
    excluded_folders: &[S],
    count: usize,
    now: i64,
    rng: &mut R,
) -> Vec<NoteFile> {
    let start = Instant::now();

    let candidates = filter_files(notes, excluded_folders);
    let weights: Vec<f64> = candidates
        .iter()
        .map(|note| compute_weight(note.created, history.get(&note.path), now))
        .collect();

    let selected = weighted_random_sample(&candidates, &weights, count, rng);

    debug!(
        total = notes.len(),
        eligible = candidates.len(),
        requested = count,
        selected = selected.len(),
        "select_notes"
    );
    trace_time!(start, "select_notes");

    selected
}
