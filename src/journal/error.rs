//! Journal error types

use crate::storage::StorageError;
use thiserror::Error;

/// Errors raised by the journal store
#[derive(Error, Debug)]
pub enum JournalError {
    /// Backend read or write failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Persisted collection could not be parsed
    #[error("Stored journal under key {key:?} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// A required form field was blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type alias for journal operations
pub type JournalResult<T> = Result<T, JournalError>;
