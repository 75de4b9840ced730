//! Bounded retry with linear backoff for fallible async operations.
//!
//! The executor is deliberately agnostic to the error type: it does not
//! inspect what failed, so a validation failure wrapped in [`with_retry`] is
//! retried exactly like a transient one. Callers should only wrap storage
//! calls; retrying is sequential and a caller that loses interest cannot
//! interrupt a sequence already in flight.

use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Default number of attempts before giving up
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default backoff base delay
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Retry parameters used by the store facade for every storage call.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts; 1 means a single attempt with no retry
    pub max_retries: u32,
    /// Backoff grows linearly: `base_delay × attempt_number` after the n-th
    /// failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

/// Runs `operation` up to `max_retries` times, sleeping
/// `base_delay × attempt_number` between attempts.
///
/// Returns the first success immediately without further calls. After the
/// final failed attempt the last error is returned as-is; no translation
/// happens here. `max_retries` of 0 is treated as 1.
///
/// # Arguments
/// * `operation` - Closure producing a fresh future per attempt
/// * `max_retries` - Total attempts, not retries-after-the-first
/// * `base_delay` - Backoff unit; the n-th failure sleeps n × this
pub async fn with_retry<T, E, F, Fut>(
    mut operation: F,
    max_retries: u32,
    base_delay: Duration,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    let max_retries = max_retries.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= max_retries => return Err(err),
            Err(err) => {
                warn!(attempt, max_retries, error = %err, "operation failed, retrying");
                tokio::time::sleep(base_delay * attempt).await;
                attempt += 1;
            }
        }
    }
}

/// Runs `operation` under a [`RetryPolicy`].
pub async fn with_policy<T, E, F, Fut>(
    policy: RetryPolicy,
    operation: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    with_retry(operation, policy.max_retries, policy.base_delay).await
}
