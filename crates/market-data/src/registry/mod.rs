//! Resilience layer between the engine and market data providers:
//! rate limiting, retry/backoff/timeout, and batch fetching.

mod fetcher;
mod rate_limiter;
mod retry_policy;

pub use fetcher::{SnapshotFetcher, TickerFetch, DIVIDEND_LOOKBACK_MONTHS};
pub use rate_limiter::RateLimiter;
pub use retry_policy::RetryPolicy;
