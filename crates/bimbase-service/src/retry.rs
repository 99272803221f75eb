//! Retry of transient storage failures.
//!
//! Only errors with [`BimError::is_retriable`] are retried; every other
//! error is returned on the first attempt.

use bimbase_config::RetryConfig;
use bimbase_core::{BimError, BimResult};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Exponential backoff for operations failing with `StorageUnavailable`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Builds a policy from the storage retry settings.
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_delay: config.initial_delay(),
            max_delay: config.max_delay(),
            multiplier: 2.0,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Calculates the delay before the given attempt (0-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let base = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32 - 1);
        Duration::from_millis(base.min(self.max_delay.as_millis() as f64) as u64)
    }

    /// Runs `f`, retrying while it fails with a retriable error.
    pub async fn execute<F, Fut, T>(&self, operation: &str, mut f: F) -> BimResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = BimResult<T>>,
    {
        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let delay = self.delay_for_attempt(attempt);
                debug!(operation, attempt, ?delay, "Retrying");
                tokio::time::sleep(delay).await;
            }

            match f().await {
                Ok(value) => return Ok(value),
                Err(e) if self.should_retry(&e, attempt) => {
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        code = e.error_code(),
                        error = %e,
                        "Storage unavailable"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns whether another attempt would follow this error.
    pub fn should_retry(&self, error: &BimError, attempt: u32) -> bool {
        error.is_retriable() && attempt + 1 < self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
            multiplier: 2.0,
        }
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = fast(10);
        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(2));
        assert_eq!(policy.delay_for_attempt(6), Duration::from_millis(4));
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let config = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(RetryPolicy::from_config(&config).max_attempts, 1);
    }

    #[tokio::test]
    async fn test_retries_until_available() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = fast(3)
            .execute("probe", move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(BimError::unavailable("down"))
                } else {
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: BimResult<()> = fast(2)
            .execute("probe", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BimError::unavailable("down"))
            })
            .await;

        assert!(result.unwrap_err().is_retriable());
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: BimResult<()> = fast(5)
            .execute("probe", move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BimError::constraint("bad"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!fast(5).should_retry(&BimError::constraint("bad"), 0));
    }
}
