//! Typed error enums for the service layer.
//!
//! `ExtractError` covers a single source (bad header, bad list literal, CSV
//! framing); `ServiceError` adds the file path and storage failures on top.

use std::path::PathBuf;

use paintlog_storage::StorageError;
use thiserror::Error;

/// Failure while reading one source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A list literal such as `['a', 'b']` could not be parsed.
    #[error("malformed list literal at offset {offset}: {reason}")]
    MalformedList { offset: usize, reason: &'static str },

    /// A required header column is absent.
    #[error("{source_name} source has no `{column}` column")]
    MissingColumn { source_name: &'static str, column: &'static str },

    /// CSV framing or header decoding failed.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Service-layer error unifying file, extraction and storage failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, duplicate, etc.). Fatal to an ETL run.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// A source file could not be opened or read.
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file was readable but unusable as a whole.
    #[error("extracting {}: {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}
