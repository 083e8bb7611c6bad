//! Error types for the PharmaQuery library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for PharmaQuery operations.
///
/// Two classes of failure matter to callers: load errors (the workbook could
/// not be read) and query errors ([`PharmaQueryError::Agent`]). Both are
/// terminal for the current operation and non-fatal for the process.
#[derive(Debug, Error)]
pub enum PharmaQueryError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the XLSX workbook.
    #[error("Failed to read workbook '{path}': {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// Workbook contained no usable sheets or data.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error parsing a TOML config file.
    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while the agent processed a question.
    #[error("Query failed: {0}")]
    Agent(String),
}

/// Result type alias for PharmaQuery operations.
pub type Result<T> = std::result::Result<T, PharmaQueryError>;
