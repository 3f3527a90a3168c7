//! Retry Infrastructure
//!
//! Exponential backoff with full jitter for transient failures.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one (>= 1)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single delay
    pub max_delay: Duration,
    /// Randomise each delay in `[0, backoff]`
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
            jitter: true,
        }
    }

    /// Backoff before retry number `retry` (1-based), before jitter
    pub fn backoff(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }

    /// Delay to sleep before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let backoff = self.backoff(retry);
        if !self.jitter || backoff.is_zero() {
            return backoff;
        }
        let millis = backoff.as_millis() as u64;
        Duration::from_millis(rand::rng().random_range(0..=millis))
    }

    /// Run `op` until it succeeds, fails permanently, or attempts run out
    ///
    /// ## Arguments
    /// * `op` - Operation to run; called once per attempt
    /// * `is_transient` - Whether an error is worth retrying
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, is_transient: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts && is_transient(&err) => {
                    let delay = self.delay_for(attempt);
                    tracing::debug!(
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
