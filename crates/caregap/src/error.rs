//! Error types for the caregap library.

use std::path::PathBuf;
use thiserror::Error;

/// Failure raised by a column handler while coercing a raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The value cannot be read as a number.
    #[error("'{value}' is not numeric")]
    NotNumeric { value: String },

    /// The value has a type the handler does not accept.
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    /// The token is not part of the enum's closed value set.
    #[error("'{token}' is not a recognized {domain} token")]
    UnknownToken { domain: &'static str, token: String },

    /// The value does not match the configured date format.
    #[error("'{value}' does not match date format '{format}'")]
    DateFormat { value: String, format: String },
}

/// Main error type for caregap operations.
#[derive(Debug, Error)]
pub enum CaregapError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing a source or score file.
    #[error("Parse error at row {row}, column {column}: {message}")]
    Parse {
        row: usize,
        column: usize,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the relational store.
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Configuration error (connection string, output path, options).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Training/holdout partition integrity violated by the source data.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Unrecoverable coercion failure while ingesting a row.
    #[error("Cannot coerce {entity}.{column} at row {row} (value {value}): {source}")]
    Coercion {
        entity: String,
        column: String,
        row: usize,
        value: String,
        #[source]
        source: CoercionError,
    },

    /// Logical source name with no registry entity.
    #[error("Unknown entity: '{0}'")]
    UnknownEntity(String),

    /// A registry column is absent from a source's header.
    #[error("Source '{source_name}' is missing column '{column}'")]
    MissingColumn { source_name: String, column: String },

    /// A required source was not supplied.
    #[error("Missing source: '{0}'")]
    MissingSource(String),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),
}

/// Result type alias for caregap operations.
pub type Result<T> = std::result::Result<T, CaregapError>;
