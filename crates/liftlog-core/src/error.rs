//! Error types for repository and maintenance operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::{retry::Cancelled, store::StoreError, validate::ValidationError};

/// Error type for all data layer operations.
///
/// Every variant that originates from a repository call carries the name of
/// the failing operation so callers can attribute failures without parsing
/// messages.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Caller passed a missing or malformed identifier
    #[error("{operation}: invalid input for field '{field}': {reason}")]
    InvalidInput {
        operation: &'static str,
        field: String,
        reason: String,
    },
    /// Caller passed an entity that fails structural validation
    #[error("{operation}: invalid {entity} record: {source}")]
    InvalidRecord {
        operation: &'static str,
        entity: &'static str,
        #[source]
        source: ValidationError,
    },
    /// The underlying key-value store failed (transient)
    #[error("{operation}: storage failure: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
    /// Encoding a collection for writing failed
    #[error("{operation}: serialization error: {source}")]
    Serialization {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// A retry loop was cancelled before it could finish
    #[error("operation cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },
    /// File system operation errors while preparing the data directory
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    operation: &'static str,
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(operation: &'static str, field: impl Into<String>) -> Self {
        Self {
            operation,
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> StorageError {
        StorageError::InvalidInput {
            operation: self.operation,
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl StorageError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(operation: &'static str, field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(operation, field)
    }

    /// Creates an invalid record error for the given entity kind.
    pub fn invalid_record(
        operation: &'static str,
        entity: &'static str,
        source: ValidationError,
    ) -> Self {
        Self::InvalidRecord {
            operation,
            entity,
            source,
        }
    }

    /// Name of the operation that failed, if the error came from one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInput { operation, .. }
            | Self::InvalidRecord { operation, .. }
            | Self::Store { operation, .. }
            | Self::Serialization { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Whether re-running the same operation may succeed.
    ///
    /// Only transient store failures qualify; everything else is either the
    /// caller's fault or a local invariant that a retry cannot fix.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store { source, .. } if source.is_transient())
    }
}

impl From<Cancelled> for StorageError {
    fn from(cancelled: Cancelled) -> Self {
        Self::Cancelled {
            attempts: cancelled.attempts,
        }
    }
}

/// Extension trait attaching an operation name to store results.
pub trait StoreResultExt<T> {
    /// Map store errors into a [`StorageError`] for `operation`.
    fn in_operation(self, operation: &'static str) -> Result<T>;
}

impl<T> StoreResultExt<T> for std::result::Result<T, StoreError> {
    fn in_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|source| StorageError::Store { operation, source })
    }
}

/// Result type alias for data layer operations
pub type Result<T> = std::result::Result<T, StorageError>;
