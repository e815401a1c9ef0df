//! Retry, backoff and timeout policy for provider calls.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};

use crate::errors::{MarketDataError, RetryClass};

/// Bounded retries with exponential backoff and a fixed per-attempt timeout.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each subsequent retry.
    pub base_delay: Duration,
    /// Upper bound for a single backoff delay.
    pub max_delay: Duration,
    /// Deadline for each individual attempt.
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(4),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `operation` under this policy.
    ///
    /// Each attempt is bounded by `timeout`; an elapsed deadline becomes
    /// [`MarketDataError::Timeout`]. Only errors classified
    /// [`RetryClass::WithBackoff`] are retried.
    pub async fn run<T, F, Fut>(
        &self,
        provider: &str,
        label: &str,
        mut operation: F,
    ) -> Result<T, MarketDataError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, MarketDataError>>,
    {
        let mut attempt = 0;
        loop {
            let outcome = match tokio::time::timeout(self.timeout, operation()).await {
                Ok(result) => result,
                Err(_) => Err(MarketDataError::Timeout {
                    provider: provider.to_string(),
                }),
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if error.retry_class() == RetryClass::Never || attempt >= self.max_retries {
                if attempt > 0 {
                    warn!("{} failed after {} retries: {}", label, attempt, error);
                }
                return Err(error);
            }

            attempt += 1;
            let delay = self.backoff(attempt);
            debug!(
                "{} failed ({}), retry {}/{} in {:?}",
                label, error, attempt, self.max_retries, delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}
