//! Error types for the data-loader crate.
//!
//! Loading is the only fallible stage of the system: once a `GameDataset`
//! exists, every query over it is infallible.

use thiserror::Error;

/// Errors that can occur while loading and cleaning the review dataset.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (bad quoting, unreadable headers, ...)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A row was readable but one of its fields was not
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: u64, reason: String },

    /// A header the loader cannot work without is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
