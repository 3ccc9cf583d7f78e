//! Retry policy engine.
//!
//! [`run_with_retry`] runs an async operation under a [`RetryPolicy`]:
//! capped exponential backoff between attempts, a predicate deciding which
//! errors are worth retrying, a per-retry callback and an optional recovery
//! hook. The same engine drives storage operations (transient I/O faults)
//! and outbound network calls (transient transport faults).
//!
//! ```text
//! attempt 0 ──fail──▶ sleep min(base·factor⁰, max) ──▶ attempt 1 ──fail──▶ …
//!     │                                                    │
//!     └──ok──▶ return                                      └──ok──▶ on_recovered, return
//! ```
//!
//! The engine holds no state of its own. A policy is immutable once built
//! and may be shared between concurrent invocations.
//!
//! # Examples
//!
//! ```rust
//! use liftlog_core::retry::{run_with_retry, Cancelled, RetryOptions, RetryPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Busy,
//!     Cancelled,
//! }
//!
//! impl From<Cancelled> for FetchError {
//!     fn from(_: Cancelled) -> Self {
//!         FetchError::Cancelled
//!     }
//! }
//!
//! # async fn example() {
//! let policy = RetryPolicy::new(RetryOptions {
//!     base_delay_ms: 10,
//!     ..RetryOptions::default()
//! })
//! .retry_if(|err: &FetchError| matches!(err, FetchError::Busy));
//!
//! let value = run_with_retry(&policy, &CancellationToken::new(), |attempt| async move {
//!     if attempt < 2 { Err(FetchError::Busy) } else { Ok(attempt) }
//! })
//! .await
//! .unwrap();
//! assert_eq!(value, 2);
//! # }
//! ```

use std::{fmt, future::Future, sync::Arc, time::Duration};

use log::debug;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Public configuration surface for retries.
///
/// Delays are expressed in milliseconds so the options can be loaded from
/// JSON or passed on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetryOptions {
    /// Retries after the first attempt; `0` means exactly one attempt
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds
    pub base_delay_ms: u64,

    /// Upper bound for any single delay, in milliseconds
    pub max_delay_ms: u64,

    /// Multiplier applied per retry; must be at least 1
    pub backoff_factor: f64,
}

impl Default for RetryOptions {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 10_000,
            backoff_factor: 2.0,
        }
    }
}

impl RetryOptions {
    /// Options that never retry.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Check that the numeric settings are usable.
    pub fn validate(&self) -> Result<(), String> {
        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            return Err(format!(
                "backoff factor must be a finite number >= 1, got {}",
                self.backoff_factor
            ));
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(format!(
                "max delay ({}ms) must not be smaller than base delay ({}ms)",
                self.max_delay_ms, self.base_delay_ms
            ));
        }
        Ok(())
    }

    /// Delay to wait before `attempt` (1-based retry number).
    ///
    /// `min(base_delay * backoff_factor^(attempt-1), max_delay)`; attempt 0
    /// never waits.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use liftlog_core::retry::RetryOptions;
    ///
    /// let options = RetryOptions::default();
    /// assert_eq!(options.delay_for_attempt(1), Duration::from_millis(1000));
    /// assert_eq!(options.delay_for_attempt(3), Duration::from_millis(4000));
    /// assert_eq!(options.delay_for_attempt(9), Duration::from_millis(10_000));
    /// ```
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        let factor = self.backoff_factor.max(1.0);
        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let raw = self.base_delay_ms as f64 * factor.powi(exponent);
        let capped = raw.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}

/// Details handed to the `on_retry` callback.
#[derive(Debug)]
pub struct RetryEvent<'a, E> {
    /// Number of the attempt about to run (1 for the first retry)
    pub attempt: u32,

    /// Backoff delay that will elapse before that attempt
    pub delay: Duration,

    /// Error that caused the retry
    pub error: &'a E,
}

/// Returned by [`run_with_retry`] when its cancellation token fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled {
    /// Attempts that actually ran before cancellation
    pub attempts: u32,
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cancelled after {} attempt(s)", self.attempts)
    }
}

impl std::error::Error for Cancelled {}

type RetryCondition<E> = Arc<dyn Fn(&E) -> bool + Send + Sync>;
type RetryCallback<E> = Arc<dyn Fn(&RetryEvent<'_, E>) + Send + Sync>;
type RecoveredCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Retry configuration plus the callbacks that make it caller-specific.
pub struct RetryPolicy<E> {
    options: RetryOptions,
    retry_condition: RetryCondition<E>,
    on_retry: Option<RetryCallback<E>>,
    on_recovered: Option<RecoveredCallback>,
}

impl<E> RetryPolicy<E> {
    /// Create a policy that retries every error.
    pub fn new(options: RetryOptions) -> Self {
        Self {
            options,
            retry_condition: Arc::new(|_| true),
            on_retry: None,
            on_recovered: None,
        }
    }

    /// Only retry errors for which `condition` returns `true`.
    pub fn retry_if<F>(mut self, condition: F) -> Self
    where
        F: Fn(&E) -> bool + Send + Sync + 'static,
    {
        self.retry_condition = Arc::new(condition);
        self
    }

    /// Call `callback` before every retry.
    pub fn on_retry<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RetryEvent<'_, E>) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
        self
    }

    /// Call `callback` with the number of retries it took when an operation
    /// succeeds after at least one failure.
    pub fn on_recovered<F>(mut self, callback: F) -> Self
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        self.on_recovered = Some(Arc::new(callback));
        self
    }

    /// The numeric settings of this policy.
    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Whether `error` passes the retry predicate.
    pub fn should_retry(&self, error: &E) -> bool {
        (self.retry_condition)(error)
    }
}

impl<E> Clone for RetryPolicy<E> {
    fn clone(&self) -> Self {
        Self {
            options: self.options.clone(),
            retry_condition: Arc::clone(&self.retry_condition),
            on_retry: self.on_retry.clone(),
            on_recovered: self.on_recovered.clone(),
        }
    }
}

impl<E> fmt::Debug for RetryPolicy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("options", &self.options)
            .field("on_retry", &self.on_retry.is_some())
            .field("on_recovered", &self.on_recovered.is_some())
            .finish()
    }
}

/// Run `operation` until it succeeds, the policy gives up, or `cancel` fires.
///
/// `operation` receives the zero-based attempt number. Errors it returns
/// must already be in the caller's error type; the last one is returned
/// unchanged once the retry predicate rejects it or `max_retries` is
/// reached. Cancellation is checked before every attempt and raced against
/// every backoff sleep.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy<E>,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<Cancelled>,
{
    let options = &policy.options;
    let mut attempt = 0;

    loop {
        if attempt > 0 {
            let delay = options.delay_for_attempt(attempt);
            tokio::select! {
                _ = cancel.cancelled() => return Err(Cancelled { attempts: attempt }.into()),
                _ = tokio::time::sleep(delay) => {}
            }
        }
        if cancel.is_cancelled() {
            return Err(Cancelled { attempts: attempt }.into());
        }

        match operation(attempt).await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("Operation recovered after {attempt} retr(y/ies)");
                    if let Some(on_recovered) = &policy.on_recovered {
                        on_recovered(attempt);
                    }
                }
                return Ok(value);
            }
            Err(error) => {
                if attempt >= options.max_retries || !policy.should_retry(&error) {
                    return Err(error);
                }

                let next = attempt + 1;
                if let Some(on_retry) = &policy.on_retry {
                    on_retry(&RetryEvent {
                        attempt: next,
                        delay: options.delay_for_attempt(next),
                        error: &error,
                    });
                }
                attempt = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    };

    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient(u32),
        Fatal,
        Cancelled(u32),
    }

    impl From<Cancelled> for TestError {
        fn from(cancelled: Cancelled) -> Self {
            TestError::Cancelled(cancelled.attempts)
        }
    }

    fn transient_only(options: RetryOptions) -> RetryPolicy<TestError> {
        RetryPolicy::new(options).retry_if(|err| matches!(err, TestError::Transient(_)))
    }

    #[test]
    fn test_default_options() {
        let options = RetryOptions::default();
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.base_delay_ms, 1000);
        assert_eq!(options.max_delay_ms, 10_000);
        assert_eq!(options.backoff_factor, 2.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_shrinking_backoff() {
        let options = RetryOptions {
            backoff_factor: 0.5,
            ..RetryOptions::default()
        };
        assert!(options.validate().is_err());

        let options = RetryOptions {
            backoff_factor: f64::NAN,
            ..RetryOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_delay_progression_is_capped() {
        let options = RetryOptions {
            max_retries: 6,
            base_delay_ms: 100,
            max_delay_ms: 1000,
            backoff_factor: 3.0,
        };
        let delays: Vec<u64> = (0..=6)
            .map(|n| options.delay_for_attempt(n).as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![0, 100, 300, 900, 1000, 1000, 1000]);
    }

    #[test]
    fn test_factor_one_is_fixed_delay() {
        let options = RetryOptions {
            backoff_factor: 1.0,
            base_delay_ms: 250,
            ..RetryOptions::default()
        };
        for attempt in 1..5 {
            assert_eq!(options.delay_for_attempt(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: RetryOptions = serde_json::from_str(r#"{"maxRetries": 5}"#).unwrap();
        assert_eq!(options.max_retries, 5);
        assert_eq!(options.base_delay_ms, 1000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_first_time_without_callbacks() {
        let retries = Arc::new(AtomicU32::new(0));
        let seen = retries.clone();
        let policy = transient_only(RetryOptions::default())
            .on_retry(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .on_recovered(|_| panic!("nothing to recover from"));

        let result = run_with_retry(&policy, &CancellationToken::new(), |_| async {
            Ok::<_, TestError>("ok")
        })
        .await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(retries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_runs_max_retries_plus_one() {
        let delays = Arc::new(Mutex::new(Vec::new()));
        let recorded = delays.clone();
        let policy = transient_only(RetryOptions {
            max_retries: 4,
            base_delay_ms: 100,
            max_delay_ms: 500,
            backoff_factor: 2.0,
        })
        .on_retry(move |event| {
            recorded
                .lock()
                .unwrap()
                .push((event.attempt, event.delay.as_millis() as u64));
        });

        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();
        let result: Result<(), _> = run_with_retry(&policy, &CancellationToken::new(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(TestError::Transient(attempt)) }
        })
        .await;

        assert_eq!(result, Err(TestError::Transient(4)));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(
            *delays.lock().unwrap(),
            vec![(1, 100), (2, 200), (3, 400), (4, 500)]
        );
        assert_eq!(started.elapsed(), Duration::from_millis(1200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_is_single_attempt() {
        let policy = transient_only(RetryOptions::no_retry());
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = run_with_retry(&policy, &CancellationToken::new(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(TestError::Transient(attempt)) }
        })
        .await;

        assert_eq!(result, Err(TestError::Transient(0)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_short_circuits() {
        let policy = transient_only(RetryOptions {
            max_retries: 10,
            ..RetryOptions::default()
        });
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = run_with_retry(&policy, &CancellationToken::new(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;

        assert_eq!(result, Err(TestError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovery_hook_reports_attempts() {
        let recovered = Arc::new(AtomicU32::new(0));
        let hook = recovered.clone();
        let policy = transient_only(RetryOptions::default()).on_recovered(move |attempts| {
            hook.store(attempts, Ordering::SeqCst);
        });

        let result = run_with_retry(&policy, &CancellationToken::new(), |attempt| async move {
            if attempt < 2 {
                Err(TestError::Transient(attempt))
            } else {
                Ok(attempt)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(recovered.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff() {
        let policy = transient_only(RetryOptions {
            max_retries: 5,
            base_delay_ms: 60_000,
            max_delay_ms: 60_000,
            backoff_factor: 1.0,
        });
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        let policy_for_task = policy.clone();

        let task = tokio::spawn(async move {
            run_with_retry(&policy_for_task, &cancel, |attempt| async move {
                Err::<(), _>(TestError::Transient(attempt))
            })
            .await
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();

        assert_eq!(task.await.unwrap(), Err(TestError::Cancelled(1)));
    }

    #[tokio::test]
    async fn test_cancelled_before_first_attempt() {
        let policy = transient_only(RetryOptions::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let calls = AtomicU32::new(0);

        let result: Result<(), _> = run_with_retry(&policy, &cancel, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await;

        assert_eq!(result, Err(TestError::Cancelled(0)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
