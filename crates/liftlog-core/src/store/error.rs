//! Errors raised by key-value store backends.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur inside a [`KeyValueStore`](super::KeyValueStore).
///
/// Every variant except [`StoreError::KeyTooLong`] is transient.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while touching the file backing a key.
    #[error("I/O error for key '{key}' at {path}: {source}")]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while enumerating the data directory.
    #[error("I/O error listing {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backend cannot serve requests right now.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The key cannot be represented by this backend.
    #[error("key '{key}' encodes to {encoded_len} bytes, limit is {limit}")]
    KeyTooLong {
        key: String,
        encoded_len: usize,
        limit: usize,
    },
}

impl StoreError {
    /// Create an I/O error with key and path context.
    pub fn io(key: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a listing error for the given directory.
    pub fn listing(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Listing {
            path: path.into(),
            source,
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::KeyTooLong { .. })
    }

    /// Create an unavailable-backend error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Convenience type alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
