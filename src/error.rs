//! Error types for the bitconf configuration system.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
///
/// Raised by the file-store layer. Callers that load the persisted settings
/// layer recover from read errors locally; write errors always propagate.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// API-level errors surfaced to callers of the configuration facade
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Logging initialization failed: {0}")]
    LoggingError(String),
}
