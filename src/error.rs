// File: ./src/error.rs
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no data directory available for this platform")]
    NoDataDir,
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("stored list is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not lock {path}: {source}")]
    Lock { path: String, source: io::Error },
    #[error("storage rejected write for key '{0}'")]
    WriteRejected(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
