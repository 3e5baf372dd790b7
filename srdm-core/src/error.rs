//! Error types for srdm-core

use thiserror::Error;

/// Main error type for the srdm-core library
#[derive(Error, Debug)]
pub enum Error {
    /// An entity with the same identity already exists, or a table delete
    /// was attempted without force.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Update targeted an identity that is not stored
    #[error("not found: {0}")]
    NotFound(String),

    /// Identity with the wrong shape, or a stored row that cannot be decoded
    #[error("malformed: {0}")]
    Malformed(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of [`Error`] for callers that only need to
/// decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    Malformed,
    Unavailable,
}

impl Error {
    /// Classify this error.
    ///
    /// Engine failures are `Unavailable`, except row conversion failures
    /// which mean the stored data itself is bad.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Conflict(_) => ErrorKind::Conflict,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Malformed(_) | Error::Json(_) => ErrorKind::Malformed,
            Error::Database(
                rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..)
                | rusqlite::Error::IntegralValueOutOfRange(..),
            ) => ErrorKind::Malformed,
            Error::Database(_) | Error::Io(_) | Error::Config(_) => ErrorKind::Unavailable,
        }
    }

    /// True when the engine rejected a write because the primary key is
    /// already taken.
    pub(crate) fn is_duplicate_key(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }
}

/// Result type alias for srdm-core
pub type Result<T> = std::result::Result<T, Error>;
