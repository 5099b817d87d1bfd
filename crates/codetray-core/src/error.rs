use std::io;
use thiserror::Error;

/// Failure while writing one of the persisted records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to move temp file into place: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Failure while reading a persisted record. Never surfaced past the
/// tolerant loaders in `storage`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No file at {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Corrupt content: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejection of an add-snippet request.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Both a label and a body are required")]
    MissingField,
    /// The snippet was appended in memory but did not reach disk.
    #[error("Snippet added for this session but not saved: {0}")]
    PersistFailed(#[source] StorageError),
}

/// Clipboard or input-simulation failure. Best-effort, never fatal.
#[derive(Debug, Error)]
pub enum ActuationError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Could not focus previous window: {0}")]
    Focus(String),
    #[error("Could not simulate paste: {0}")]
    Paste(String),
}

#[derive(Debug, Error)]
pub enum CodetrayError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Actuation(#[from] ActuationError),
    #[error("Error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CodetrayError>;
