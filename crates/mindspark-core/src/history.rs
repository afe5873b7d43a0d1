//! View history bookkeeping
//!
//! The history maps a note path to when it was last shown and how often.
//! Updates never mutate in place: [`ViewHistory::record_shown`] returns a new
//! history so callers can keep the previous value around.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How often and when a note was shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRecord {
    /// Milliseconds since the Unix epoch, `0` when never shown
    pub last_shown: i64,
    /// Number of times the note was shown
    pub show_count: u64,
}

impl ViewRecord {
    /// Coerce a stored record, defaulting fields that are not numbers.
    ///
    /// Returns `None` for values that are not objects at all.
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;

        let last_shown = record
            .get("lastShown")
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
            .map_or(0, |n| n as i64);

        let show_count = record
            .get("showCount")
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite() && *n > 0.0)
            .map_or(0, |n| n as u64);

        Some(ViewRecord {
            last_shown,
            show_count,
        })
    }
}

/// Mapping from note path to its view record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHistory {
    records: BTreeMap<String, ViewRecord>,
}

impl ViewHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for a note path
    pub fn get(&self, path: &str) -> Option<&ViewRecord> {
        self.records.get(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records ordered by path
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewRecord)> {
        self.records.iter().map(|(path, record)| (path.as_str(), record))
    }

    /// Return a copy with `path` marked as shown at `now`
    pub fn record_shown(&self, path: &str, now: i64) -> ViewHistory {
        let show_count = self
            .records
            .get(path)
            .map_or(1, |current| current.show_count.saturating_add(1));

        let mut records = self.records.clone();
        records.insert(
            path.to_string(),
            ViewRecord {
                last_shown: now,
                show_count,
            },
        );

        ViewHistory { records }
    }

    /// Rebuild a history from a stored JSON value.
    ///
    /// Anything that is not an object yields an empty history; entries whose
    /// value is not an object are dropped, and malformed fields default to 0.
    pub fn from_value(value: &Value) -> ViewHistory {
        let Some(entries) = value.as_object() else {
            return ViewHistory::new();
        };

        let mut records = BTreeMap::new();
        for (path, value) in entries {
            match ViewRecord::from_value(value) {
                Some(record) => {
                    records.insert(path.clone(), record);
                }
                None => {
                    tracing::warn!(path = %path, "dropping malformed view record");
                }
            }
        }

        ViewHistory { records }
    }
}

impl FromIterator<(String, ViewRecord)> for ViewHistory {
    fn from_iter<I: IntoIterator<Item = (String, ViewRecord)>>(iter: I) -> Self {
        ViewHistory {
            records: iter.into_iter().collect(),
        }
    }
}
