//! Error types for dataset loading and querying.

use thiserror::Error;

/// Main error type for dataset operations.
///
/// These never escape the loader boundary: [`crate::loader::load_or_empty`]
/// turns every variant into an empty dataset plus a diagnostic message.
#[derive(Error, Debug)]
pub enum DataError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read a local file or inflate a compressed body
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a response arrived
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { status: String, url: String },

    /// Body was not valid UTF-8
    #[error("Response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Input had no header row
    #[error("CSV input has no header row")]
    MissingHeader,

    /// Two headers normalize to the same column name
    #[error("Duplicate column after normalization: {0}")]
    DuplicateColumn(String),

    /// In-memory SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Dashboard configuration could not be read
    #[error("Invalid dashboard configuration: {0}")]
    Config(String),
}

/// Type alias for Results using DataError
pub type Result<T> = std::result::Result<T, DataError>;
