//! User settings for mindspark
//!
//! Settings live in the `settings` section of the data file. Loading is
//! lenient: every missing or mistyped field falls back to its default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bail_invalid;
use crate::error::Result;
use crate::exclusion::ExclusionSet;

/// Smallest allowed batch size
pub const MIN_NOTE_COUNT: usize = 3;

/// Largest allowed batch size
pub const MAX_NOTE_COUNT: usize = 10;

/// Batch size when none is configured
pub const DEFAULT_NOTE_COUNT: usize = 5;

/// Settings section of the data file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Number of notes shown per batch
    pub note_count: usize,
    /// Folders whose notes are never shown
    pub excluded_folders: ExclusionSet,
    /// Draw a new batch every time the panel opens
    pub refresh_on_open: bool,
    /// Whether the first-run hint was dismissed
    pub onboarding_dismissed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            note_count: DEFAULT_NOTE_COUNT,
            excluded_folders: ExclusionSet::default(),
            refresh_on_open: true,
            onboarding_dismissed: false,
        }
    }
}

/// Check that a batch size is within the configurable range
pub fn validate_note_count(count: usize) -> Result<usize> {
    if !(MIN_NOTE_COUNT..=MAX_NOTE_COUNT).contains(&count) {
        bail_invalid!(
            "note count",
            format!("{count} (expected {MIN_NOTE_COUNT}-{MAX_NOTE_COUNT})")
        );
    }
    Ok(count)
}

impl Settings {
    /// Merge a stored settings object over the defaults.
    ///
    /// Non-object input yields the defaults. Note counts outside the allowed
    /// range are clamped; non-string, blank, duplicate and already covered
    /// folder entries are dropped.
    pub fn from_value(value: &Value) -> Settings {
        let defaults = Settings::default();
        let Some(stored) = value.as_object() else {
            return defaults;
        };

        let note_count = stored
            .get("noteCount")
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
            .map_or(defaults.note_count, |n| {
                (n.round().max(0.0) as usize).clamp(MIN_NOTE_COUNT, MAX_NOTE_COUNT)
            });

        let excluded_folders = stored
            .get("excludedFolders")
            .and_then(Value::as_array)
            .map(|folders| {
                folders
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .map_or(defaults.excluded_folders, |folders| {
                ExclusionSet::new(folders).prune_redundant()
            });

        let refresh_on_open = stored
            .get("refreshOnOpen")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.refresh_on_open);

        let onboarding_dismissed = stored
            .get("onboardingDismissed")
            .and_then(Value::as_bool)
            .unwrap_or(defaults.onboarding_dismissed);

        Settings {
            note_count,
            excluded_folders,
            refresh_on_open,
            onboarding_dismissed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.note_count, 5);
        assert!(settings.excluded_folders.is_empty());
        assert!(settings.refresh_on_open);
        assert!(!settings.onboarding_dismissed);
    }

    #[test]
    fn test_partial_object_keeps_defaults() {
        let settings = Settings::from_value(&json!({"refreshOnOpen": false}));
        assert_eq!(settings.note_count, DEFAULT_NOTE_COUNT);
        assert!(!settings.refresh_on_open);
        assert!(!settings.onboarding_dismissed);
    }

    #[test]
    fn test_mistyped_fields_fall_back() {
        let settings = Settings::from_value(&json!({
            "noteCount": "seven",
            "excludedFolders": "Archive",
            "refreshOnOpen": "yes",
            "onboardingDismissed": 1
        }));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_note_count_is_clamped() {
        assert_eq!(Settings::from_value(&json!({"noteCount": 1})).note_count, 3);
        assert_eq!(Settings::from_value(&json!({"noteCount": 99})).note_count, 10);
        assert_eq!(Settings::from_value(&json!({"noteCount": 7})).note_count, 7);
        assert_eq!(Settings::from_value(&json!({"noteCount": -2})).note_count, 3);
    }

    #[test]
    fn test_non_string_folders_are_dropped() {
        let settings = Settings::from_value(&json!({"excludedFolders": ["Archive", 3, null, "Daily"]}));
        assert_eq!(
            settings.excluded_folders.folders(),
            ["Archive".to_string(), "Daily".to_string()]
        );
    }

    #[test]
    fn test_redundant_folders_are_pruned_on_load() {
        let settings = Settings::from_value(&json!({
            "excludedFolders": ["Archive/2023", "Archive", "  ", "archive/", "Daily"]
        }));
        assert_eq!(
            settings.excluded_folders.folders(),
            ["Archive".to_string(), "Daily".to_string()]
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "noteCount": 5,
                "excludedFolders": [],
                "refreshOnOpen": true,
                "onboardingDismissed": false
            })
        );
    }

    #[test]
    fn test_validate_note_count() {
        assert_eq!(validate_note_count(3).unwrap(), 3);
        assert_eq!(validate_note_count(10).unwrap(), 10);
        assert!(validate_note_count(2).is_err());
        assert!(validate_note_count(11).is_err());
    }
}
