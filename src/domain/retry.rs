//! Bounded polling with a fixed delay between attempts.
//!
//! The pipeline has exactly two waiting points: the elastic-IP check against
//! the cloud metadata endpoint and the model-runtime readiness probe. Both
//! are coarse busy-poll loops with a fixed sleep, so the policy here supports
//! an optional backoff multiplier but defaults to constant delay.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Bounds for a polling loop.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Maximum number of probe attempts. Never zero.
    pub max_attempts: u32,
    /// Delay between attempts.
    pub delay: Duration,
    /// Multiplier applied to the delay after each attempt (1.0 = fixed).
    pub backoff_multiplier: f64,
    /// Upper bound for the delay when backing off.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// A policy with a constant delay between attempts.
    #[must_use]
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff_multiplier: 1.0,
            max_delay: delay,
        }
    }
}

/// Result of a polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollResult {
    /// Whether the probe eventually returned true.
    pub succeeded: bool,
    /// Number of attempts actually made.
    pub attempts: u32,
}

/// Run `probe` until it returns true or the policy is exhausted.
///
/// Sleeps between attempts but not after the last one. The caller decides
/// whether exhaustion is fatal; the address waiter treats it as a warning
/// while the model readiness check treats it as an abort.
pub async fn poll_until<F, Fut>(policy: &RetryPolicy, name: &str, mut probe: F) -> PollResult
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let mut delay = policy.delay;

    for attempt in 1..=policy.max_attempts {
        if probe().await {
            debug!(operation = %name, attempt, "Probe succeeded");
            return PollResult {
                succeeded: true,
                attempts: attempt,
            };
        }

        if attempt < policy.max_attempts {
            warn!(
                operation = %name,
                attempt,
                max_attempts = policy.max_attempts,
                delay_ms = delay.as_millis(),
                "Probe failed, waiting before retry"
            );
            tokio::time::sleep(delay).await;
            delay = Duration::from_secs_f64(
                (delay.as_secs_f64() * policy.backoff_multiplier)
                    .min(policy.max_delay.as_secs_f64()),
            );
        }
    }

    warn!(operation = %name, attempts = policy.max_attempts, "Probe exhausted all attempts");
    PollResult {
        succeeded: false,
        attempts: policy.max_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_succeeds_on_first_attempt() {
        let policy = RetryPolicy::fixed(20, Duration::from_secs(30));
        let result = poll_until(&policy, "probe", || async { true }).await;
        assert_eq!(
            result,
            PollResult {
                succeeded: true,
                attempts: 1
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let policy = RetryPolicy::fixed(5, Duration::from_secs(5));
        let result = poll_until(&policy, "probe", || {
            let c = c.clone();
            async move { c.fetch_add(1, Ordering::SeqCst) >= 2 }
        })
        .await;

        assert!(result.succeeded);
        assert_eq!(result.attempts, 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_max_attempts() {
        let count = Arc::new(AtomicU32::new(0));
        let c = count.clone();

        let policy = RetryPolicy::fixed(20, Duration::from_secs(30));
        let result = poll_until(&policy, "probe", || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                false
            }
        })
        .await;

        assert!(!result.succeeded);
        assert_eq!(result.attempts, 20);
        assert_eq!(count.load(Ordering::SeqCst), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_policy_keeps_constant_delay() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(5));
        let start = tokio::time::Instant::now();
        let result = poll_until(&policy, "probe", || async { false }).await;
        // Two sleeps between three attempts, none after the last.
        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert_eq!(result.attempts, 3);
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        let policy = RetryPolicy::fixed(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
    }
}
