//! Retrying HTTP-style client over a pluggable [`Transport`].

use std::{fmt, time::Duration};

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use super::{
    classify::{NetworkErrorClassifier, RawFailure},
    error::NetworkError,
};
use crate::retry::{run_with_retry, RetryOptions, RetryPolicy};

/// Per-attempt deadline used unless [`ResilientClient::with_timeout`] says
/// otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A response as returned by the transport, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request with no retry or deadline of its own.
///
/// Implementations report connection problems as [`RawFailure`]s and
/// return every response they receive, including error statuses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response, RawFailure>;
}

/// Build the retry policy used for network calls.
///
/// Retries exactly the errors whose kind is retryable and logs every retry
/// at `warn`.
pub fn network_retry_policy(options: RetryOptions) -> RetryPolicy<NetworkError> {
    RetryPolicy::new(options)
        .retry_if(|err: &NetworkError| err.retryable)
        .on_retry(|event| {
            warn!(
                "Retrying request {} (attempt {}, in {:?}): {}",
                event.error.request_id, event.attempt, event.delay, event.error
            );
        })
}

/// Wraps a [`Transport`] with deadlines, classification and retries.
///
/// Every failure leaving this client is a classified [`NetworkError`].
pub struct ResilientClient<T> {
    transport: T,
    classifier: NetworkErrorClassifier,
    policy: RetryPolicy<NetworkError>,
    timeout: Duration,
    cancel: CancellationToken,
}

impl<T: Transport> ResilientClient<T> {
    pub fn new(transport: T, classifier: NetworkErrorClassifier, options: RetryOptions) -> Self {
        Self {
            transport,
            classifier,
            policy: network_retry_policy(options),
            timeout: DEFAULT_TIMEOUT,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort any attempt that has not answered within `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Replace the retry policy, e.g. to surface retries in a UI.
    ///
    /// Start from [`network_retry_policy`] to keep retrying on
    /// [`NetworkError::retryable`].
    pub fn with_retry_policy(mut self, policy: RetryPolicy<NetworkError>) -> Self {
        self.policy = policy;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Returns the first successful (2xx) response.
    pub async fn execute(&self, request: &Request) -> Result<Response, NetworkError> {
        run_with_retry(&self.policy, &self.cancel, move |attempt| async move {
            self.attempt(request).await.map_err(|failure| {
                let error = self.classifier.classify(&failure);
                debug!(
                    "{} {} failed on attempt {attempt}: {error}",
                    request.method, request.url
                );
                error
            })
        })
        .await
    }

    /// `GET` `url` and decode the JSON body.
    ///
    /// A body that does not decode is reported as an `Unknown` error and is
    /// not retried.
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, NetworkError> {
        let response = self.execute(&Request::get(url)).await?;
        serde_json::from_str(&response.body).map_err(|e| {
            self.classifier.classify(&RawFailure::Decode {
                message: e.to_string(),
            })
        })
    }

    async fn attempt(&self, request: &Request) -> Result<Response, RawFailure> {
        match tokio::time::timeout(self.timeout, self.transport.send(request)).await {
            Err(_) => Err(RawFailure::DeadlineElapsed {
                after: self.timeout,
            }),
            Ok(Err(failure)) => Err(failure),
            Ok(Ok(response)) if response.is_success() => Ok(response),
            Ok(Ok(response)) => Err(RawFailure::Status {
                status: response.status,
                message: response.body,
            }),
        }
    }
}
