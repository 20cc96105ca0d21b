//! Retry logic.
//!
//! # Responsibilities
//! - Run an async operation up to a bounded number of attempts
//! - Sleep a fixed delay (or jittered exponential backoff) between attempts
//! - Stop early on errors that will not improve with another attempt
//! - Stop early when shutdown is requested

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::lifecycle::Shutdown;
use crate::resilience::backoff::calculate_backoff;

/// Errors that know whether another attempt makes sense.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed delay, or the base delay when `exponential` is set.
    pub delay: Duration,
    /// Use jittered exponential backoff.
    pub exponential: bool,
    /// Upper bound for exponential backoff.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Policy with a flat delay between attempts.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            exponential: false,
            max_delay: delay,
        }
    }

    /// Delay to wait after `failures` failed attempts.
    pub fn delay_after(&self, failures: u32) -> Duration {
        if self.exponential {
            calculate_backoff(
                failures,
                self.delay.as_millis() as u64,
                self.max_delay.as_millis() as u64,
            )
        } else {
            self.delay
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: Duration::from_millis(config.delay_ms),
            exponential: config.exponential,
            max_delay: Duration::from_millis(config.max_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// # Arguments
/// * `policy` - Attempts and delays
/// * `name` - Operation name used in log fields
/// * `shutdown` - Aborts waiting between attempts
/// * `operation` - Produces a fresh future per attempt
///
/// # Returns
/// The first success, or the error of the last attempt made.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    name: &str,
    shutdown: &Shutdown,
    mut operation: F,
) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retryable() || attempt >= policy.max_attempts {
                    if attempt > 1 {
                        tracing::warn!(
                            operation = name,
                            attempts = attempt,
                            error = %e,
                            "Giving up"
                        );
                    }
                    return Err(e);
                }

                let delay = policy.delay_after(attempt);
                tracing::warn!(
                    operation = name,
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );

                if !shutdown.sleep(delay).await {
                    return Err(e);
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct TestError {
        retryable: bool,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "test error (retryable={})", self.retryable)
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            self.retryable
        }
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::fixed(5, Duration::from_millis(1));

        let result = retry(&policy, "test", &Shutdown::new(), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(TestError { retryable: true })
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_bounded_attempts() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::fixed(3, Duration::from_millis(1));

        let result: Result<(), _> = retry(&policy, "test", &Shutdown::new(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError { retryable: true })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_stops_immediately() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::fixed(5, Duration::from_millis(1));

        let result: Result<(), _> = retry(&policy, "test", &Shutdown::new(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError { retryable: false })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_retrying() {
        let calls = &AtomicU32::new(0);
        let policy = RetryPolicy::fixed(5, Duration::from_secs(60));
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let result: Result<(), _> = retry(&policy, "test", &shutdown, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError { retryable: true })
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_policy_from_config() {
        let config = RetryConfig {
            max_attempts: 0,
            delay_ms: 250,
            exponential: true,
            max_delay_ms: 1000,
        };
        let policy = RetryPolicy::from(&config);
        assert_eq!(policy.max_attempts, 1);
        assert!(policy.delay_after(1) >= Duration::from_millis(250));
        assert_eq!(
            RetryPolicy::fixed(2, Duration::from_secs(2)).delay_after(4),
            Duration::from_secs(2)
        );
    }
}
