//! Error types for the catalog crate.
//!
//! These never escape the store: `Catalog::load` turns every one of them into
//! an empty catalog plus a log line. They are public so that callers who want
//! the strict behaviour can use `parser::parse_catalog` directly.

use thiserror::Error;

/// Errors that can occur while reading the catalog source
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row couldn't be turned into a record
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: u64, reason: String },

    /// The header row lacks a column the engine reads
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
