//! Network error classification and resilient request execution.
//!
//! Outbound calls (exercise catalog, sync) go through a [`Transport`]. The
//! [`ResilientClient`] adds a per-attempt deadline, maps every failure onto
//! the closed [`NetworkErrorKind`] taxonomy through a
//! [`NetworkErrorClassifier`], and retries only the kinds that are worth
//! retrying.
//!
//! ```text
//! Transport::send ──▶ RawFailure ──▶ classify ──▶ NetworkError ──▶ retryable?
//!                                       │                              │
//!                               MessageCatalog                 run_with_retry
//! ```
//!
//! User-facing wording comes from an injected [`MessageCatalog`] and never
//! from the raw error text.

mod classify;
mod client;
mod error;
mod messages;

pub use classify::{NetworkErrorClassifier, RawFailure};
pub use client::{
    network_retry_policy, Method, Request, ResilientClient, Response, Transport,
    DEFAULT_TIMEOUT,
};
pub use error::{NetworkError, NetworkErrorKind};
pub use messages::{ErrorMessage, Locale, MessageCatalog};
