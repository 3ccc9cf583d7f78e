//! Mapping raw failures onto the [`NetworkErrorKind`] taxonomy.

use std::time::Duration;

use thiserror::Error;

use super::{
    error::{NetworkError, NetworkErrorKind},
    messages::MessageCatalog,
};

/// A failure as observed at the transport boundary, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawFailure {
    /// The server answered with a non-success status
    #[error("{}", status_text(.message))]
    Status { status: u16, message: String },

    /// The device reports no network
    #[error("device is offline")]
    Offline,

    /// Connection-level failure (DNS, refused, reset)
    #[error("{message}")]
    Transport { message: String },

    /// No response within the per-attempt deadline
    #[error("no response within {after:?}")]
    DeadlineElapsed { after: Duration },

    /// A success response whose body could not be decoded
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// The retry loop was cancelled
    #[error("request cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    #[error("{message}")]
    Other { message: String },
}

impl RawFailure {
    /// Shorthand for a status failure.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a connection-level failure.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn status_text(message: &str) -> &str {
    if message.is_empty() {
        "request failed"
    } else {
        message
    }
}

/// Turns [`RawFailure`]s into [`NetworkError`]s.
///
/// Classification is pure apart from the fresh request id and timestamp:
/// the same failure always yields the same kind, retryability and wording.
/// It neither retries nor displays anything.
#[derive(Debug, Clone, Default)]
pub struct NetworkErrorClassifier {
    catalog: MessageCatalog,
}

impl NetworkErrorClassifier {
    pub fn new(catalog: MessageCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// The kind a failure maps to.
    pub fn kind_of(failure: &RawFailure) -> NetworkErrorKind {
        match failure {
            RawFailure::Status { status: 401, .. } => NetworkErrorKind::Unauthorized,
            RawFailure::Status { status: 403, .. } => NetworkErrorKind::Forbidden,
            RawFailure::Status { status: 404, .. } => NetworkErrorKind::NotFound,
            RawFailure::Status { status: 429, .. } => NetworkErrorKind::RateLimited,
            RawFailure::Status { status, .. } if *status >= 500 => NetworkErrorKind::ServerError,
            RawFailure::Offline | RawFailure::Transport { .. } => NetworkErrorKind::NoConnection,
            RawFailure::DeadlineElapsed { .. } => NetworkErrorKind::Timeout,
            RawFailure::Status { .. }
            | RawFailure::Decode { .. }
            | RawFailure::Cancelled { .. }
            | RawFailure::Other { .. } => NetworkErrorKind::Unknown,
        }
    }

    pub fn classify(&self, failure: &RawFailure) -> NetworkError {
        let kind = Self::kind_of(failure);
        let status = failure.status_code();
        let technical_message = match status {
            Some(status) => format!("HTTP {status}: {failure}"),
            None => failure.to_string(),
        };

        NetworkError::new(kind, status, self.catalog.message(kind), technical_message)
    }
}
