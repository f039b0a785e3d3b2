// Bounded, fixed-delay polling of an asynchronous provider job

use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::app_config::ScannerConfig;

/// Fixed retry policy: no exponential growth, no jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(config.poll_attempts, config.poll_delay())
    }

    /// Upper bound on time spent sleeping between attempts
    pub fn max_wait(&self) -> Duration {
        self.delay * self.max_attempts.saturating_sub(1)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(
            crate::app_config::DEFAULT_POLL_ATTEMPTS,
            Duration::from_millis(crate::app_config::DEFAULT_POLL_DELAY_MS),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome<T> {
    Completed { value: T, attempts: u32 },
    TimedOut { attempts: u32 },
}

/// Run `attempt` up to `policy.max_attempts` times, sleeping `policy.delay`
/// between attempts. Stops at the first `Some`. Attempts are 1-based.
pub async fn poll_until_complete<T, F, Fut>(policy: PollPolicy, mut attempt: F) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for n in 1..=policy.max_attempts {
        if let Some(value) = attempt(n).await {
            return PollOutcome::Completed { value, attempts: n };
        }

        if n < policy.max_attempts {
            debug!(
                "Waiting for scan result... ({}/{})",
                n, policy.max_attempts
            );
            tokio::time::sleep(policy.delay).await;
        }
    }

    PollOutcome::TimedOut {
        attempts: policy.max_attempts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_completes_early() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = PollPolicy::new(10, Duration::from_secs(2));
        let start = Instant::now();

        let counter = calls.clone();
        let outcome = poll_until_complete(policy, |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { (n == 3).then_some("done") }
        })
        .await;

        assert_eq!(
            outcome,
            PollOutcome::Completed {
                value: "done",
                attempts: 3
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two sleeps between three attempts
        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_at_ceiling() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = PollPolicy::new(5, Duration::from_millis(2500));
        let start = Instant::now();

        let counter = calls.clone();
        let outcome: PollOutcome<()> = poll_until_complete(policy, |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { None }
        })
        .await;

        assert_eq!(outcome, PollOutcome::TimedOut { attempts: 5 });
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(start.elapsed(), policy.max_wait());
        assert_eq!(policy.max_wait(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_does_not_sleep() {
        let start = Instant::now();
        let outcome = poll_until_complete(PollPolicy::default(), |_| async { Some(42) }).await;

        assert_eq!(outcome, PollOutcome::Completed { value: 42, attempts: 1 });
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_policy_floor() {
        let policy = PollPolicy::new(0, Duration::from_secs(1));
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.max_wait(), Duration::ZERO);
    }
}
