//! Retry handling for transient API failures

use std::future::Future;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

use crate::error::{PubMedError, Result};

/// Classification of errors into transient and permanent failures
pub trait RetryableError {
    /// Whether the operation that produced this error is worth retrying
    fn is_retryable(&self) -> bool;

    /// Short label describing why the error is or is not retried
    fn retry_reason(&self) -> &str;
}

/// Retry policy for outgoing API requests
///
/// The default policy performs no retries: a failed request surfaces its
/// error immediately. Setting `max_retries` enables jittered exponential
/// backoff between attempts.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Number of retry attempts after the initial request
    pub max_retries: usize,
    /// Base delay in milliseconds for exponential backoff
    pub base_delay_ms: u64,
}

impl RetryConfig {
    /// Create a retry policy with default values (no retries)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of retry attempts for transient failures
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base backoff delay in milliseconds
    pub fn with_base_delay_ms(mut self, base_delay_ms: u64) -> Self {
        self.base_delay_ms = base_delay_ms;
        self
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 10,
        }
    }
}

/// Run `operation`, retrying retryable failures according to `config`.
///
/// Only errors whose `RetryableError::is_retryable` returns true are retried;
/// permanent failures are returned on the first attempt.
pub(crate) async fn with_retry<T, F, Fut>(
    operation: F,
    config: &RetryConfig,
    description: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let strategy = ExponentialBackoff::from_millis(config.base_delay_ms)
        .map(jitter)
        .take(config.max_retries);

    RetryIf::spawn(strategy, operation, |err: &PubMedError| {
        let retryable = err.is_retryable();
        if retryable {
            warn!(
                reason = err.retry_reason(),
                error = %err,
                "{} failed with retryable error",
                description
            );
        }
        retryable
    })
    .await
}
