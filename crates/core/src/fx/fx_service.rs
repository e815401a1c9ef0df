use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Months, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use super::fx_analysis::analyze_closes;
use super::fx_errors::FxError;
use super::fx_model::{FxAnalysis, FxRate};
use super::fx_traits::FxRateProviderTrait;
use crate::constants::{DEFAULT_FX_PAIR, FALLBACK_USD_KRW_RATE};
use yieldfolio_market_data::SnapshotFetcher;

/// Days of daily closes requested when only the latest rate is needed.
const LATEST_RATE_LOOKBACK_DAYS: i64 = 7;

/// Months of daily closes used for technical analysis.
const ANALYSIS_LOOKBACK_MONTHS: u32 = 12;

/// Resolves the USD to reporting-currency rate for a pass.
///
/// Rate failures never fail the pass: the documented fallback of 1400 is
/// substituted and flagged on the returned [`FxRate`].
#[derive(Clone)]
pub struct FxService {
    provider: Arc<dyn FxRateProviderTrait>,
    pair: String,
}

impl FxService {
    pub fn new(provider: Arc<dyn FxRateProviderTrait>) -> Self {
        Self::with_pair(provider, DEFAULT_FX_PAIR)
    }

    pub fn with_pair(provider: Arc<dyn FxRateProviderTrait>, pair: impl Into<String>) -> Self {
        Self {
            provider,
            pair: pair.into(),
        }
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub async fn current_rate(&self) -> FxRate {
        match self.provider.fetch_rate(&self.pair).await {
            Ok(rate) if rate > Decimal::ZERO => {
                debug!("Using {} rate {}", self.pair, rate);
                FxRate {
                    rate,
                    is_fallback: false,
                }
            }
            Ok(rate) => {
                warn!(
                    "Non-positive rate {} for {}, using fallback {}",
                    rate, self.pair, FALLBACK_USD_KRW_RATE
                );
                Self::fallback()
            }
            Err(e) => {
                warn!(
                    "Rate lookup for {} failed ({}), using fallback {}",
                    self.pair, e, FALLBACK_USD_KRW_RATE
                );
                Self::fallback()
            }
        }
    }

    /// Technical indicators over the last year of daily closes.
    pub async fn analysis(&self, now: DateTime<Utc>) -> Result<Option<FxAnalysis>, FxError> {
        let start = now
            .checked_sub_months(Months::new(ANALYSIS_LOOKBACK_MONTHS))
            .unwrap_or(now);
        let closes = self.provider.fetch_closes(&self.pair, start, now).await?;
        Ok(analyze_closes(&closes))
    }

    fn fallback() -> FxRate {
        FxRate {
            rate: FALLBACK_USD_KRW_RATE,
            is_fallback: true,
        }
    }
}

/// Rates read from a market data provider's daily FX closes.
pub struct MarketDataFxRateProvider {
    fetcher: Arc<SnapshotFetcher>,
}

impl MarketDataFxRateProvider {
    pub fn new(fetcher: Arc<SnapshotFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl FxRateProviderTrait for MarketDataFxRateProvider {
    async fn fetch_rate(&self, pair: &str) -> Result<Decimal, FxError> {
        let end = Utc::now();
        let start = end - Duration::days(LATEST_RATE_LOOKBACK_DAYS);
        let closes = self.fetch_closes(pair, start, end).await?;
        let rate = closes
            .last()
            .copied()
            .ok_or_else(|| FxError::RateUnavailable(pair.to_string()))?;
        if rate <= Decimal::ZERO {
            return Err(FxError::InvalidRate {
                pair: pair.to_string(),
                rate: rate.to_string(),
            });
        }
        Ok(rate)
    }

    async fn fetch_closes(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Decimal>, FxError> {
        let mut quotes = self.fetcher.fetch_fx_history(pair, start, end).await?;
        quotes.sort_by_key(|q| q.timestamp);
        Ok(quotes.into_iter().map(|q| q.close).collect())
    }
}
