//! Normalised network error taxonomy.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{
    classify::{NetworkErrorClassifier, RawFailure},
    messages::ErrorMessage,
};
use crate::retry::Cancelled;

/// Closed set of failure categories every network failure maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NetworkErrorKind {
    NoConnection,
    Timeout,
    ServerError,
    Unauthorized,
    Forbidden,
    NotFound,
    RateLimited,
    Unknown,
}

impl NetworkErrorKind {
    pub const ALL: [NetworkErrorKind; 8] = [
        NetworkErrorKind::NoConnection,
        NetworkErrorKind::Timeout,
        NetworkErrorKind::ServerError,
        NetworkErrorKind::Unauthorized,
        NetworkErrorKind::Forbidden,
        NetworkErrorKind::NotFound,
        NetworkErrorKind::RateLimited,
        NetworkErrorKind::Unknown,
    ];

    /// Whether failures of this kind are worth re-attempting.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoConnection | Self::Timeout | Self::ServerError | Self::RateLimited
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoConnection => "NO_CONNECTION",
            Self::Timeout => "TIMEOUT",
            Self::ServerError => "SERVER_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::RateLimited => "RATE_LIMITED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Position of this kind in [`ALL`](Self::ALL).
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkErrorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown network error kind: {s}"))
    }
}

/// A classified network failure.
///
/// Carries two audiences: `title` and `user_message` come from a
/// [`MessageCatalog`](super::MessageCatalog) and are safe to show, while
/// `technical_message` keeps the original error text for logs. Each value
/// is built once per failed attempt and never modified.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{kind}: {technical_message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub status: Option<u16>,
    pub retryable: bool,
    pub title: String,
    pub user_message: String,
    pub technical_message: String,
    pub timestamp: Timestamp,
    pub request_id: Uuid,
}

impl NetworkError {
    /// Build an error of `kind` with a fresh request id.
    pub fn new(
        kind: NetworkErrorKind,
        status: Option<u16>,
        message: &ErrorMessage,
        technical_message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            status,
            retryable: kind.is_retryable(),
            title: message.title.clone(),
            user_message: message.message.clone(),
            technical_message: technical_message.into(),
            timestamp: Timestamp::now(),
            request_id: Uuid::new_v4(),
        }
    }
}

/// Cancellation surfaces as a non-retryable `Unknown` error with the
/// default catalog's wording.
impl From<Cancelled> for NetworkError {
    fn from(cancelled: Cancelled) -> Self {
        NetworkErrorClassifier::default().classify(&RawFailure::Cancelled {
            attempts: cancelled.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_kinds() {
        let retryable: Vec<_> = NetworkErrorKind::ALL
            .iter()
            .filter(|kind| kind.is_retryable())
            .copied()
            .collect();
        assert_eq!(
            retryable,
            vec![
                NetworkErrorKind::NoConnection,
                NetworkErrorKind::Timeout,
                NetworkErrorKind::ServerError,
                NetworkErrorKind::RateLimited,
            ]
        );
    }

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in NetworkErrorKind::ALL {
            assert_eq!(kind.as_str().parse::<NetworkErrorKind>(), Ok(kind));
            assert_eq!(NetworkErrorKind::ALL[kind.index()], kind);
        }
        assert!("teapot".parse::<NetworkErrorKind>().is_err());
    }

    #[test]
    fn test_cancelled_is_not_retryable() {
        let err = NetworkError::from(Cancelled { attempts: 2 });
        assert_eq!(err.kind, NetworkErrorKind::Unknown);
        assert!(!err.retryable);
        assert!(err.technical_message.contains("2 attempt(s)"));
    }
}
