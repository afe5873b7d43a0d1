//! Persisted data file
//!
//! The data file is a single JSON object:
//!
//! ```json
//! {
//!   "settings": {"noteCount": 5, "excludedFolders": [], "refreshOnOpen": true, "onboardingDismissed": false},
//!   "viewHistory": {"Ideas/x.md": {"lastShown": 1700000000000, "showCount": 2}},
//!   "lastShownPaths": ["Ideas/x.md"]
//! }
//! ```
//!
//! Loading repairs whatever it can instead of failing: a missing file,
//! unparsable JSON or mistyped sections all fall back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::{MindsparkError, Result};
use crate::history::ViewHistory;

/// Directory inside the vault holding mindspark state
pub const DATA_DIR: &str = ".mindspark";

/// File name of the data file inside [`DATA_DIR`]
pub const DATA_FILE: &str = "data.json";

/// Default data file location for a vault
pub fn default_data_path(vault_root: &Path) -> PathBuf {
    vault_root.join(DATA_DIR).join(DATA_FILE)
}

/// Everything mindspark persists between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparkData {
    pub settings: Settings,
    pub view_history: ViewHistory,
    /// Paths of the most recent batch, used to restore it
    pub last_shown_paths: Vec<String>,
}

impl SparkData {
    /// Rebuild data from a stored JSON value, repairing malformed parts
    pub fn from_value(value: &Value) -> SparkData {
        let settings = value
            .get("settings")
            .map(Settings::from_value)
            .unwrap_or_default();

        let view_history = value
            .get("viewHistory")
            .map(ViewHistory::from_value)
            .unwrap_or_default();

        let last_shown_paths = value
            .get("lastShownPaths")
            .and_then(Value::as_array)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        SparkData {
            settings,
            view_history,
            last_shown_paths,
        }
    }

    /// Load the data file, falling back to defaults when it is missing or
    /// not valid JSON.
    ///
    /// Only failing to read an existing file is an error.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<SparkData> {
        if !path.exists() {
            debug!("data file missing, using defaults");
            return Ok(SparkData::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| MindsparkError::io_operation("read", path.display(), e))?;

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => Ok(SparkData::from_value(&value)),
            Err(e) => {
                warn!(error = %e, "data file is not valid JSON, using defaults");
                Ok(SparkData::default())
            }
        }
    }

    /// Write the data file as pretty JSON, creating its directory
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| MindsparkError::io_operation("create directory", dir.display(), e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .map_err(|e| MindsparkError::io_operation("write", path.display(), e))?;

        debug!(records = self.view_history.len(), "saved data file");
        Ok(())
    }
}

/// Copy of `data` with `path` recorded as shown at `now`
pub fn record_note_shown(data: &SparkData, path: &str, now: i64) -> SparkData {
    SparkData {
        view_history: data.view_history.record_shown(path, now),
        ..data.clone()
    }
}

/// Copy of `data` with view history and last shown paths emptied
pub fn clear_history(data: &SparkData) -> SparkData {
    SparkData {
        settings: data.settings.clone(),
        view_history: ViewHistory::new(),
        last_shown_paths: Vec::new(),
    }
}
