//! Token bucket rate limiter for a market data provider.
//!
//! The bucket refills continuously at the provider's requests-per-minute
//! rate and allows bursting up to its capacity.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::provider::RateLimit;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn with_config(requests_per_minute: u32, capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: f64::from(requests_per_minute.max(1)) / 60.0,
            capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    fn try_acquire(&mut self) -> bool {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn time_until_available(&mut self) -> Duration {
        self.refill();
        if self.tokens >= 1.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64((1.0 - self.tokens) / self.rate)
        }
    }
}

/// Thread-safe rate limiter shared by all concurrent fetches against one provider.
pub struct RateLimiter {
    provider: &'static str,
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    /// Create a limiter sized from the provider's declared rate limit.
    pub fn new(provider: &'static str, limit: &RateLimit) -> Self {
        Self::with_capacity(provider, limit.requests_per_minute, f64::from(limit.burst.max(1)))
    }

    pub fn with_capacity(provider: &'static str, requests_per_minute: u32, capacity: f64) -> Self {
        Self {
            provider,
            bucket: Mutex::new(TokenBucket::with_config(requests_per_minute, capacity)),
        }
    }

    /// Lock the bucket, recovering from poison.
    ///
    /// A poisoned bucket only risks slightly inaccurate pacing.
    fn lock_bucket(&self) -> MutexGuard<'_, TokenBucket> {
        self.bucket.lock().unwrap_or_else(|poisoned| {
            warn!("Rate limiter mutex for '{}' was poisoned, recovering", self.provider);
            poisoned.into_inner()
        })
    }

    /// Wait (asynchronously) until a token is available, then take it.
    pub async fn acquire(&self) {
        loop {
            let wait_time = {
                let mut bucket = self.lock_bucket();
                if bucket.try_acquire() {
                    return;
                }
                bucket.time_until_available()
            };

            if wait_time > Duration::ZERO {
                debug!(
                    "Rate limiter: waiting {:?} for provider '{}'",
                    wait_time, self.provider
                );
                tokio::time::sleep(wait_time).await;
            }
        }
    }

    /// Take a token without waiting. Returns false when rate limited.
    pub fn try_acquire(&self) -> bool {
        self.lock_bucket().try_acquire()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_allows_burst_up_to_capacity() {
        let limiter = RateLimiter::with_capacity("TEST", 60, 3.0);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[test]
    fn test_bucket_refills_over_time() {
        let mut bucket = TokenBucket::with_config(60, 1.0);
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());

        bucket.last_update = Instant::now() - Duration::from_secs(2);
        assert!(bucket.try_acquire());
    }

    #[test]
    fn test_limit_burst_sets_capacity() {
        let limiter = RateLimiter::new("TEST", &RateLimit::new(60, 1, 4));
        for _ in 0..4 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_async_acquire_waits_for_refill() {
        // 100 tokens/second
        let limiter = RateLimiter::with_capacity("FAST", 6000, 1.0);
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed().as_millis() >= 5);
    }
}
