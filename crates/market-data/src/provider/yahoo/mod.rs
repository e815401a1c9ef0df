//! Yahoo Finance market data provider.
//!
//! This provider uses the Yahoo Finance API to fetch:
//! - Price, dividend and analyst snapshots (quoteSummary API)
//! - Dividend events (chart API, via `yahoo_finance_api`)
//! - Daily FX closes (e.g. KRW=X)

mod models;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{DividendPayment, MarketSnapshot, Quote, DEFAULT_QUOTE_CURRENCY};
use crate::provider::{MarketDataProvider, RateLimit};

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult, YahooRawValue};

const PROVIDER_ID: &str = "YAHOO";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

fn read_crumb() -> RwLockReadGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_crumb() -> RwLockWriteGuard<'static, Option<CrumbData>> {
    YAHOO_CRUMB.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn provider_error(message: impl Into<String>) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: message.into(),
    }
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    ///
    /// `request_timeout` bounds every HTTP call made through the shared client.
    pub fn new(request_timeout: Duration) -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| provider_error(format!("Failed to initialize Yahoo connector: {}", e)))?;
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { connector, client })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        if let Some(crumb) = read_crumb().as_ref() {
            return Ok(crumb.clone());
        }
        self.fetch_crumb().await
    }

    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| provider_error("Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| provider_error(format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| provider_error(format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };
        *write_crumb() = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    fn clear_crumb(&self) {
        *write_crumb() = None;
    }

    // ========================================================================
    // Snapshot Fetching
    // ========================================================================

    async fn fetch_quote_summary(
        &self,
        symbol: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules=price,summaryDetail,financialData,assetProfile&crumb={}",
            encode(symbol),
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    provider_error(format!("quoteSummary request failed: {}", e))
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                self.clear_crumb();
                return Err(provider_error("Yahoo authentication expired"));
            }
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            _ => {}
        }

        let data: YahooQuoteSummaryResponse = response
            .json()
            .await
            .map_err(|e| provider_error(format!("Failed to parse quoteSummary response: {}", e)))?;

        data.quote_summary
            .result
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    fn map_chart_error(symbol: &str, e: yahoo::YahooError) -> MarketDataError {
        if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
            MarketDataError::SymbolNotFound(symbol.to_string())
        } else {
            provider_error(e.to_string())
        }
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit::new(2000, 10, 20)
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<MarketSnapshot, MarketDataError> {
        debug!("Fetching snapshot for {} from Yahoo", ticker);
        let result = self.fetch_quote_summary(ticker).await?;
        Ok(map_quote_summary_to_snapshot(ticker, &result))
    }

    async fn fetch_dividend_history(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<DividendPayment>, MarketDataError> {
        debug!(
            "Fetching dividends for {} from {} to {} from Yahoo",
            ticker,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let response = self
            .connector
            .get_quote_history(
                ticker,
                Self::chrono_to_offset_datetime(start),
                Self::chrono_to_offset_datetime(end),
            )
            .await
            .map_err(|e| Self::map_chart_error(ticker, e))?;

        let dividends = match response.dividends() {
            Ok(dividends) => dividends,
            Err(e) => {
                debug!("No dividend events for {}: {}", ticker, e);
                return Ok(Vec::new());
            }
        };

        let mut payments: Vec<DividendPayment> = dividends
            .into_iter()
            .filter_map(|d| {
                let ex_date = Utc.timestamp_opt(d.date as i64, 0).single()?.date_naive();
                let amount = Decimal::from_f64(d.amount)?;
                Some(DividendPayment::new(ex_date, amount))
            })
            .collect();
        payments.sort_by_key(|p| p.ex_date);

        Ok(payments)
    }

    async fn fetch_fx_history(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>, MarketDataError> {
        debug!("Fetching FX history for {} from Yahoo", pair);

        let response = self
            .connector
            .get_quote_history(
                pair,
                Self::chrono_to_offset_datetime(start),
                Self::chrono_to_offset_datetime(end),
            )
            .await
            .map_err(|e| Self::map_chart_error(pair, e))?;

        let yahoo_quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo::YahooError::NoQuotes) => {
                warn!("No FX quotes returned for '{}'", pair);
                return Err(MarketDataError::NoData(pair.to_string()));
            }
            Err(e) => return Err(provider_error(e.to_string())),
        };

        let quotes: Vec<Quote> = yahoo_quotes
            .into_iter()
            .filter_map(|q| {
                let timestamp = Utc.timestamp_opt(q.timestamp as i64, 0).single()?;
                let close = Decimal::from_f64(q.close)?;
                Some(Quote {
                    timestamp,
                    open: Decimal::from_f64(q.open),
                    high: Decimal::from_f64(q.high),
                    low: Decimal::from_f64(q.low),
                    close,
                    currency: fx_quote_currency(pair),
                    source: PROVIDER_ID.to_string(),
                })
            })
            .collect();

        if quotes.is_empty() {
            return Err(MarketDataError::NoData(pair.to_string()));
        }

        Ok(quotes)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn raw_decimal(value: Option<&YahooRawValue>) -> Option<Decimal> {
    value
        .and_then(|v| v.raw)
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64)
}

/// Map a quoteSummary result onto a snapshot.
///
/// Price precedence: `financialData.currentPrice`, then
/// `price.regularMarketPrice`, then zero (unavailable).
fn map_quote_summary_to_snapshot(ticker: &str, result: &YahooQuoteSummaryResult) -> MarketSnapshot {
    let price = result.price.as_ref();
    let detail = result.summary_detail.as_ref();
    let financial = result.financial_data.as_ref();

    let current_price = raw_decimal(financial.and_then(|f| f.current_price.as_ref()))
        .or_else(|| raw_decimal(price.and_then(|p| p.regular_market_price.as_ref())))
        .unwrap_or(Decimal::ZERO);

    let currency = price
        .and_then(|p| p.currency.clone())
        .or_else(|| detail.and_then(|d| d.currency.clone()))
        .unwrap_or_else(|| DEFAULT_QUOTE_CURRENCY.to_string());

    let dividend_rate = raw_decimal(detail.and_then(|d| d.dividend_rate.as_ref()))
        .filter(|r| !r.is_zero())
        .or_else(|| raw_decimal(detail.and_then(|d| d.trailing_annual_dividend_rate.as_ref())))
        .filter(|r| !r.is_zero());

    MarketSnapshot {
        ticker: ticker.to_string(),
        current_price,
        currency,
        dividend_rate,
        dividend_yield: raw_decimal(detail.and_then(|d| d.dividend_yield.as_ref())),
        dividend_history: Vec::new(),
        beta: raw_decimal(detail.and_then(|d| d.beta.as_ref())),
        fifty_two_week_high: raw_decimal(detail.and_then(|d| d.fifty_two_week_high.as_ref())),
        fifty_two_week_low: raw_decimal(detail.and_then(|d| d.fifty_two_week_low.as_ref())),
        target_price: raw_decimal(financial.and_then(|f| f.target_mean_price.as_ref())),
        recommendation_key: financial
            .and_then(|f| f.recommendation_key.as_ref())
            .map(|k| k.to_uppercase()),
        business_summary: result
            .asset_profile
            .as_ref()
            .and_then(|a| a.long_business_summary.clone()),
    }
}

/// "KRW=X" quotes are KRW per USD; "EURUSD=X" quotes are USD per EUR.
fn fx_quote_currency(pair: &str) -> String {
    let symbol = pair.trim_end_matches("=X");
    if symbol.chars().count() == 6 {
        symbol.chars().skip(3).collect()
    } else {
        symbol.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn summary(json: &str) -> YahooQuoteSummaryResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_snapshot_prefers_financial_data_price() {
        let result = summary(
            r#"{
                "price": {"currency": "USD", "regularMarketPrice": {"raw": 149.0}},
                "financialData": {"currentPrice": {"raw": 150.0}, "recommendationKey": "buy"},
                "summaryDetail": {
                    "dividendRate": {"raw": 0.96},
                    "dividendYield": {"raw": 0.0064},
                    "beta": {"raw": 1.2},
                    "fiftyTwoWeekHigh": {"raw": 199.5},
                    "fiftyTwoWeekLow": {"raw": 124.0}
                }
            }"#,
        );

        let snapshot = map_quote_summary_to_snapshot("AAPL", &result);
        assert_eq!(snapshot.current_price, dec!(150));
        assert_eq!(snapshot.currency, "USD");
        assert_eq!(snapshot.dividend_rate, Some(dec!(0.96)));
        assert_eq!(snapshot.beta, Some(dec!(1.2)));
        assert_eq!(snapshot.fifty_two_week_high, Some(dec!(199.5)));
        assert_eq!(snapshot.recommendation_key.as_deref(), Some("BUY"));
        assert!(snapshot.dividend_history.is_empty());
    }

    #[test]
    fn test_snapshot_falls_back_to_regular_market_price() {
        let result = summary(r#"{"price": {"currency": "KRW", "regularMarketPrice": {"raw": 71200}}}"#);
        let snapshot = map_quote_summary_to_snapshot("005930.KS", &result);
        assert_eq!(snapshot.current_price, dec!(71200));
        assert_eq!(snapshot.currency, "KRW");
    }

    #[test]
    fn test_snapshot_without_price_is_unavailable() {
        let result = summary(r#"{"summaryDetail": {"dividendYield": {}}}"#);
        let snapshot = map_quote_summary_to_snapshot("XYZ", &result);
        assert!(snapshot.is_price_unavailable());
        assert_eq!(snapshot.currency, DEFAULT_QUOTE_CURRENCY);
        assert_eq!(snapshot.dividend_yield, None);
    }

    #[test]
    fn test_zero_dividend_rate_uses_trailing_rate() {
        let result = summary(
            r#"{"summaryDetail": {
                "dividendRate": {"raw": 0.0},
                "trailingAnnualDividendRate": {"raw": 3.12}
            }}"#,
        );
        let snapshot = map_quote_summary_to_snapshot("O", &result);
        assert_eq!(snapshot.dividend_rate, Some(dec!(3.12)));
    }

    #[test]
    fn test_missing_dividend_rate_stays_absent() {
        let result = summary(r#"{"summaryDetail": {"dividendRate": {}}}"#);
        let snapshot = map_quote_summary_to_snapshot("TSLA", &result);
        assert_eq!(snapshot.dividend_rate, None);
    }

    #[test]
    fn test_fx_quote_currency() {
        assert_eq!(fx_quote_currency("KRW=X"), "KRW");
        assert_eq!(fx_quote_currency("EURUSD=X"), "USD");
    }

    #[test]
    fn test_fx_quote_currency_non_ascii_pair() {
        assert_eq!(fx_quote_currency("ab원c=X"), "ab원c");
        assert_eq!(fx_quote_currency("달러원화환율=X"), "화환율");
    }
}
