//! Error types and exit codes for sitesearch
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage or configuration error (bad flags/args, invalid config)
//! - 3: Data/store error (unreadable store, missing page element, etc.)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args or config (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while running the search widget
#[derive(Error, Debug)]
pub enum SearchError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: html or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data/store errors (exit code 3)
    #[error("invalid store {path:?}: {reason}")]
    InvalidStore { path: PathBuf, reason: String },

    #[error("element #{id} not found in {path:?}")]
    ElementNotFound { id: String, path: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation}: {reason}")]
    Index { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for SearchError {
    fn from(err: rusqlite::Error) -> Self {
        SearchError::Index {
            operation: "query search index".to_string(),
            reason: err.to_string(),
        }
    }
}

impl SearchError {
    /// Create an error for a failed index operation
    pub fn index_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        SearchError::Index {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        SearchError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        SearchError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an invalid configuration
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SearchError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an error for a store that cannot be parsed
    pub fn invalid_store(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        SearchError::InvalidStore {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SearchError::UnknownFormat(_)
            | SearchError::UsageError(_)
            | SearchError::InvalidConfig { .. }
            | SearchError::InvalidValue { .. }
            | SearchError::Toml(_) => ExitCode::Usage,

            SearchError::InvalidStore { .. } | SearchError::ElementNotFound { .. } => {
                ExitCode::Data
            }

            SearchError::Io(_)
            | SearchError::Json(_)
            | SearchError::Index { .. }
            | SearchError::FailedOperationWithTarget { .. }
            | SearchError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            SearchError::UnknownFormat(_) => "unknown_format",
            SearchError::UsageError(_) => "usage_error",
            SearchError::InvalidConfig { .. } => "invalid_config",
            SearchError::InvalidValue { .. } => "invalid_value",
            SearchError::InvalidStore { .. } => "invalid_store",
            SearchError::ElementNotFound { .. } => "element_not_found",
            SearchError::Io(_) => "io_error",
            SearchError::Json(_) => "json_error",
            SearchError::Toml(_) => "toml_error",
            SearchError::Index { .. } => "index_error",
            SearchError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            SearchError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
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

/// Result type alias for sitesearch operations
pub type Result<T> = std::result::Result<T, SearchError>;
