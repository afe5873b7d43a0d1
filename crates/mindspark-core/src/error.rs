//! Error types and exit codes for mindspark
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/vault error (missing vault, missing note)
//!
//! Selection, weighting, filtering and text helpers never fail. Errors only
//! come from reading the vault, loading/saving the data file, and CLI usage.

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the mindspark binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/vault error - missing vault, missing note (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during mindspark operations
#[derive(Error, Debug)]
pub enum MindsparkError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/vault errors (exit code 3)
    #[error("vault not found: {path:?}")]
    VaultNotFound { path: PathBuf },

    #[error("note not found: {path}")]
    NoteNotFound { path: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl MindsparkError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        MindsparkError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or setting
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        MindsparkError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            MindsparkError::UsageError(_) | MindsparkError::InvalidValue { .. } => {
                ExitCode::Usage
            }

            MindsparkError::VaultNotFound { .. } | MindsparkError::NoteNotFound { .. } => {
                ExitCode::Data
            }

            MindsparkError::Io(_)
            | MindsparkError::Json(_)
            | MindsparkError::FailedOperationWithTarget { .. }
            | MindsparkError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            MindsparkError::UsageError(_) => "usage_error",
            MindsparkError::InvalidValue { .. } => "invalid_value",
            MindsparkError::VaultNotFound { .. } => "vault_not_found",
            MindsparkError::NoteNotFound { .. } => "note_not_found",
            MindsparkError::Io(_) => "io_error",
            MindsparkError::Json(_) => "json_error",
            MindsparkError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            MindsparkError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for mindspark operations
pub type Result<T> = std::result::Result<T, MindsparkError>;
