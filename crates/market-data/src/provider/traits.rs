//! Market data provider trait definitions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{DividendPayment, MarketSnapshot, Quote};

use super::rate_limit::RateLimit;

/// Trait for market data providers.
///
/// A provider answers three questions about a ticker: what it costs now
/// (with whatever descriptive data comes along), what it has paid out, and
/// for currency pairs, how the rate moved.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use yieldfolio_market_data::provider::{MarketDataProvider, RateLimit};
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     fn rate_limit(&self) -> RateLimit {
///         RateLimit::default()
///     }
///
///     // ... implement fetch methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider ("YAHOO", ...).
    ///
    /// Used for logging, rate limiting and error attribution.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit;

    /// Fetch the current snapshot for a ticker.
    ///
    /// Providers may leave `dividend_history` empty; callers that need it
    /// follow up with [`fetch_dividend_history`](Self::fetch_dividend_history).
    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, MarketDataError>;

    /// Fetch per-share dividend payments with ex-dates in `[start, end]`,
    /// ordered oldest first. An empty vector means the ticker paid nothing.
    async fn fetch_dividend_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DividendPayment>, MarketDataError>;

    /// Fetch daily quotes for a currency pair symbol (e.g. "KRW=X"),
    /// ordered by timestamp ascending.
    async fn fetch_fx_history(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError>;
}
