//! Selection weights
//!
//! A note's weight is the product of three factors:
//! - base weight `1.0`
//! - novelty boost `3.0` for never-shown notes, otherwise a decay ramp from
//!   `0.0` right after a showing back to `1.0` after [`DECAY_HOURS`]
//! - age boost `1 + log2(days_since_creation + 1) * 0.1`

use crate::history::ViewRecord;

/// Weight of every note before boosts and decay
pub const BASE_WEIGHT: f64 = 1.0;

/// Multiplier for notes that have never been shown
pub const NOVELTY_BOOST: f64 = 3.0;

/// Hours after a showing until a note is back at full weight
pub const DECAY_HOURS: f64 = 72.0;

/// Scale of the logarithmic age boost
pub const AGE_BOOST_SCALE: f64 = 0.1;

const MS_PER_HOUR: f64 = 1000.0 * 60.0 * 60.0;
const MS_PER_DAY: f64 = MS_PER_HOUR * 24.0;

fn hours_since(timestamp: i64, now: i64) -> f64 {
    (now.saturating_sub(timestamp) as f64 / MS_PER_HOUR).max(0.0)
}

fn days_since(timestamp: i64, now: i64) -> f64 {
    (now.saturating_sub(timestamp) as f64 / MS_PER_DAY).max(0.0)
}

/// Recency factor in `[0, 1]`, or [`NOVELTY_BOOST`] for unseen notes
pub fn decay_factor(record: Option<&ViewRecord>, now: i64) -> f64 {
    match record {
        Some(record) if record.show_count > 0 => {
            (hours_since(record.last_shown, now) / DECAY_HOURS).min(1.0)
        }
        _ => NOVELTY_BOOST,
    }
}

/// Slowly growing boost for older notes, `1.0` for brand new ones
pub fn age_boost(created: i64, now: i64) -> f64 {
    1.0 + (days_since(created, now) + 1.0).log2() * AGE_BOOST_SCALE
}

/// Compute the selection weight of a note.
///
/// Always finite and `>= 0`. Timestamps later than `now` count as zero
/// elapsed time.
pub fn compute_weight(created: i64, record: Option<&ViewRecord>, now: i64) -> f64 {
    let mut weight = BASE_WEIGHT;
    weight *= decay_factor(record, now);
    weight *= age_boost(created, now);

    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}
