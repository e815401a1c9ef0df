//! Concurrent, failure-isolated snapshot fetching.
//!
//! One [`SnapshotFetcher`] wraps one provider with a shared rate limiter and
//! retry policy. Batch fetches run through a bounded pool; every ticker
//! resolves to its own `Result`, so one bad symbol never cancels the rest.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use super::{RateLimiter, RetryPolicy};
use crate::errors::MarketDataError;
use crate::models::{MarketSnapshot, Quote};
use crate::provider::MarketDataProvider;

/// How far back dividend history is requested when a snapshot has none.
pub const DIVIDEND_LOOKBACK_MONTHS: u32 = 24;

/// Outcome of one ticker's fetch within a batch.
#[derive(Debug)]
pub struct TickerFetch {
    pub ticker: String,
    pub result: Result<MarketSnapshot, MarketDataError>,
}

pub struct SnapshotFetcher {
    provider: Arc<dyn MarketDataProvider>,
    rate_limiter: RateLimiter,
    policy: RetryPolicy,
    concurrency: usize,
}

impl SnapshotFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>, policy: RetryPolicy, concurrency: usize) -> Self {
        let limit = provider.rate_limit();
        let concurrency = concurrency.clamp(1, limit.max_concurrency.max(1));
        Self {
            rate_limiter: RateLimiter::new(provider.id(), &limit),
            provider,
            policy,
            concurrency,
        }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Fetch one ticker's snapshot, filling in dividend history when the
    /// provider's snapshot carries none.
    ///
    /// A failed history lookup is logged and leaves the history empty; only
    /// a failed snapshot lookup fails the ticker.
    pub async fn fetch_snapshot(
        &self,
        ticker: &str,
        now: DateTime<Utc>,
    ) -> Result<MarketSnapshot, MarketDataError> {
        let provider_id = self.provider.id();
        let label = format!("snapshot {}", ticker);

        let mut snapshot = self
            .policy
            .run(provider_id, &label, || async move {
                self.rate_limiter.acquire().await;
                self.provider.fetch_snapshot(ticker).await
            })
            .await?;

        if snapshot.dividend_history.is_empty() {
            let start = now
                .checked_sub_months(Months::new(DIVIDEND_LOOKBACK_MONTHS))
                .unwrap_or(now);
            let label = format!("dividends {}", ticker);
            match self
                .policy
                .run(provider_id, &label, || async move {
                    self.rate_limiter.acquire().await;
                    self.provider.fetch_dividend_history(ticker, start, now).await
                })
                .await
            {
                Ok(mut history) => {
                    history.sort_by_key(|p| p.ex_date);
                    snapshot.dividend_history = history;
                }
                Err(e) => warn!("Dividend history unavailable for {}: {}", ticker, e),
            }
        }

        Ok(snapshot)
    }

    /// Fetch snapshots for every distinct ticker, preserving first-seen order.
    pub async fn fetch_all(&self, tickers: &[String], now: DateTime<Utc>) -> Vec<TickerFetch> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = tickers
            .iter()
            .filter(|t| seen.insert(t.as_str()))
            .cloned()
            .collect();

        debug!(
            "Fetching {} tickers from '{}' with concurrency {}",
            unique.len(),
            self.provider.id(),
            self.concurrency
        );

        let results: Vec<TickerFetch> = stream::iter(unique)
            .map(|ticker| async move {
                let result = self.fetch_snapshot(&ticker, now).await;
                if let Err(e) = &result {
                    warn!("Fetch failed for {}: {}", ticker, e);
                }
                TickerFetch { ticker, result }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.result.is_err()).count();
        info!(
            "Fetched {}/{} tickers from '{}'",
            results.len() - failed,
            results.len(),
            self.provider.id()
        );

        results
    }

    /// Daily quotes for a currency pair symbol.
    pub async fn fetch_fx_history(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        let label = format!("fx history {}", pair);
        self.policy
            .run(self.provider.id(), &label, || async move {
                self.rate_limiter.acquire().await;
                self.provider.fetch_fx_history(pair, start, end).await
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DividendPayment;
    use crate::provider::RateLimit;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct MockProvider {
        snapshot_calls: AtomicU32,
        history_calls: AtomicU32,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                snapshot_calls: AtomicU32::new(0),
                history_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        fn rate_limit(&self) -> RateLimit {
            RateLimit::new(60_000, 4, 100)
        }

        async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, MarketDataError> {
            self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
            match ticker {
                "BAD" => Err(MarketDataError::SymbolNotFound(ticker.to_string())),
                "HIST" => Ok(MarketSnapshot::new(ticker, dec!(10), "USD").with_history(vec![
                    DividendPayment::new(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(), dec!(1)),
                ])),
                _ => Ok(MarketSnapshot::new(ticker, dec!(100), "USD")),
            }
        }

        async fn fetch_dividend_history(
            &self,
            ticker: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<DividendPayment>, MarketDataError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            if ticker == "NODIV" {
                return Err(MarketDataError::NoData(ticker.to_string()));
            }
            Ok(vec![
                DividendPayment::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), dec!(0.5)),
                DividendPayment::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), dec!(0.5)),
            ])
        }

        async fn fetch_fx_history(
            &self,
            pair: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<Quote>, MarketDataError> {
            Err(MarketDataError::NoData(pair.to_string()))
        }
    }

    fn fetcher(provider: Arc<MockProvider>) -> SnapshotFetcher {
        let policy = RetryPolicy {
            max_retries: 0,
            ..Default::default()
        };
        SnapshotFetcher::new(provider, policy, 8)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_batch_isolates_failures_and_keeps_order() {
        let provider = Arc::new(MockProvider::new());
        let tickers = vec!["AAPL".to_string(), "BAD".to_string(), "SCHD".to_string()];

        let results = fetcher(provider).fetch_all(&tickers, now()).await;

        let names: Vec<_> = results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(names, vec!["AAPL", "BAD", "SCHD"]);
        assert!(results[0].result.is_ok());
        assert!(matches!(
            results[1].result,
            Err(MarketDataError::SymbolNotFound(_))
        ));
        assert!(results[2].result.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_tickers_fetched_once() {
        let provider = Arc::new(MockProvider::new());
        let tickers = vec!["O".to_string(), "O".to_string()];

        let results = fetcher(provider.clone()).fetch_all(&tickers, now()).await;

        assert_eq!(results.len(), 1);
        assert_eq!(provider.snapshot_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_history_backfilled_and_sorted() {
        let provider = Arc::new(MockProvider::new());
        let snapshot = fetcher(provider.clone())
            .fetch_snapshot("O", now())
            .await
            .unwrap();

        let dates: Vec<_> = snapshot.dividend_history.iter().map(|p| p.ex_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
            ]
        );
        assert_eq!(provider.history_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_existing_history_not_refetched() {
        let provider = Arc::new(MockProvider::new());
        let snapshot = fetcher(provider.clone())
            .fetch_snapshot("HIST", now())
            .await
            .unwrap();

        assert_eq!(snapshot.dividend_history.len(), 1);
        assert_eq!(provider.history_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_history_failure_is_not_fatal() {
        let provider = Arc::new(MockProvider::new());
        let snapshot = fetcher(provider).fetch_snapshot("NODIV", now()).await.unwrap();

        assert_eq!(snapshot.current_price, dec!(100));
        assert!(snapshot.dividend_history.is_empty());
    }
}
