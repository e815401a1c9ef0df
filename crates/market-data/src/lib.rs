//! Yieldfolio Market Data Crate
//!
//! Provider-agnostic access to the per-ticker data the dividend engine
//! consumes: price/currency/dividend/analyst snapshots, dividend payment
//! history, and daily FX closes.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  Engine (core)   | --> | SnapshotFetcher  |  (bounded pool, per-ticker isolation)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                   +-----------------------------+
//!                   | RateLimiter + RetryPolicy   |  (token bucket, backoff, timeout)
//!                   +-----------------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Yahoo)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | MarketSnapshot   |
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`MarketSnapshot`] - Point-in-time price, dividend and analyst data
//! - [`DividendPayment`] - One historical per-share payment
//! - [`Quote`] - Daily price point, used for FX history
//! - [`SnapshotFetcher`] - Concurrent fetcher with retry and rate limiting

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use errors::{MarketDataError, RetryClass};

pub use models::{
    Currency, DividendPayment, MarketSnapshot, ProviderId, Quote, DEFAULT_QUOTE_CURRENCY,
};

pub use provider::yahoo::YahooProvider;
pub use provider::{MarketDataProvider, RateLimit};

pub use registry::{RateLimiter, RetryPolicy, SnapshotFetcher, TickerFetch, DIVIDEND_LOOKBACK_MONTHS};
