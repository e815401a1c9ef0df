use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDateTime;
use futures::future::join_all;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::aggregate::{calculate_totals, current_month_summary, group_by_month, income_forecast};
use super::analysis::{evaluate_rules, health_summary};
use super::optimization::{apply_targets, optimize_targets, OptimizationOutcome, OptimizationStrategy};
use super::rebalancing::{calculate_buy_only, calculate_rebalance, dca_schedules};
use super::valuation::{calculate_valuation, ValuationRow};
use super::{PassWarning, PortfolioReport};
use crate::constants::REPORTING_CURRENCY;
use crate::errors::Result;
use crate::fx::{FxAnalysis, FxService};
use crate::holdings::Holding;
use yieldfolio_market_data::{MarketSnapshot, SnapshotFetcher};
use yieldfolio_translation::{translate_or_original, Translator};

/// Translates business summaries into one target language.
#[derive(Clone)]
pub struct SummaryTranslation {
    translator: Arc<dyn Translator>,
    target_lang: String,
}

impl SummaryTranslation {
    pub fn new(translator: Arc<dyn Translator>, target_lang: impl Into<String>) -> Self {
        Self {
            translator,
            target_lang: target_lang.into(),
        }
    }
}

/// Runs one computation pass: fetch once, then derive every output from
/// that snapshot.
pub struct PortfolioService {
    fetcher: Arc<SnapshotFetcher>,
    fx_service: FxService,
    translation: Option<SummaryTranslation>,
}

impl PortfolioService {
    pub fn new(
        fetcher: Arc<SnapshotFetcher>,
        fx_service: FxService,
        translation: Option<SummaryTranslation>,
    ) -> Self {
        Self {
            fetcher,
            fx_service,
            translation,
        }
    }

    pub async fn compute(&self, holdings: &[Holding], now: NaiveDateTime) -> Result<PortfolioReport> {
        let tickers: Vec<String> = holdings.iter().map(|h| h.ticker.clone()).collect();

        let (fx_rate, fetches) = tokio::join!(
            self.fx_service.current_rate(),
            self.fetcher.fetch_all(&tickers, now.and_utc())
        );

        let mut warnings = Vec::new();
        if fx_rate.is_fallback {
            warnings.push(PassWarning::FxFallbackUsed { rate: fx_rate.rate });
        }

        let snapshots: HashMap<&str, std::result::Result<&MarketSnapshot, String>> = fetches
            .iter()
            .map(|f| {
                (
                    f.ticker.as_str(),
                    f.result.as_ref().map_err(|e| e.to_string()),
                )
            })
            .collect();

        let mut rows = Vec::with_capacity(holdings.len());
        let mut dividend_events = Vec::new();
        let mut reported: HashSet<&str> = HashSet::new();

        for holding in holdings {
            let snapshot = match snapshots.get(holding.ticker.as_str()) {
                Some(Ok(snapshot)) => *snapshot,
                Some(Err(reason)) => {
                    if reported.insert(holding.ticker.as_str()) {
                        warnings.push(PassWarning::TickerFetchFailed {
                            ticker: holding.ticker.clone(),
                            reason: reason.clone(),
                        });
                    }
                    continue;
                }
                None => {
                    if reported.insert(holding.ticker.as_str()) {
                        warnings.push(PassWarning::TickerFetchFailed {
                            ticker: holding.ticker.clone(),
                            reason: "not fetched".to_string(),
                        });
                    }
                    continue;
                }
            };

            if snapshot.is_price_unavailable() && reported.insert(holding.ticker.as_str()) {
                warnings.push(PassWarning::PriceUnavailable {
                    ticker: holding.ticker.clone(),
                });
            }

            let valuation = calculate_valuation(holding, snapshot, fx_rate.rate, now);
            rows.push(valuation.row);
            dividend_events.extend(valuation.dividends);
        }

        if let Some(translation) = &self.translation {
            self.translate_summaries(translation, &mut rows).await;
        }

        dividend_events.sort_by(|a, b| {
            a.pay_date
                .cmp(&b.pay_date)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });

        let totals = calculate_totals(&rows);
        let monthly_dividends = group_by_month(&dividend_events, now);
        let current_month = current_month_summary(&dividend_events, now);
        let forecast = income_forecast(totals.total_annual_dividend);

        let target_sum: Decimal = rows.iter().map(|r| r.target_ratio).sum();
        let (rebalance, buy_only, dca) = if target_sum.is_zero() {
            if !rows.is_empty() {
                warnings.push(PassWarning::TargetsNotSet);
            }
            (None, None, Vec::new())
        } else {
            let buy_only = calculate_buy_only(&rows, &totals);
            let dca = dca_schedules(&buy_only);
            (Some(calculate_rebalance(&rows, &totals)), Some(buy_only), dca)
        };

        let findings = evaluate_rules(&rows);
        let health = health_summary(&rows);

        info!(
            "Pass complete: {} of {} holdings valued, total {} {}, {} warnings",
            rows.len(),
            holdings.len(),
            totals.total_value.round_dp(0),
            REPORTING_CURRENCY,
            warnings.len()
        );

        Ok(PortfolioReport {
            generated_at: now,
            reporting_currency: REPORTING_CURRENCY.to_string(),
            fx_rate,
            rows,
            totals,
            dividend_events,
            monthly_dividends,
            current_month,
            income_forecast: forecast,
            rebalance,
            buy_only,
            dca,
            findings,
            health,
            warnings,
        })
    }

    /// Run a pass and rewrite targets with `strategy`.
    ///
    /// Returns the outcome and the holdings with new targets; persisting
    /// them is left to the caller.
    pub async fn optimize(
        &self,
        holdings: &[Holding],
        strategy: OptimizationStrategy,
        now: NaiveDateTime,
    ) -> Result<(OptimizationOutcome, Vec<Holding>)> {
        let report = self.compute(holdings, now).await?;
        let outcome = optimize_targets(&report.rows, strategy);
        if let OptimizationOutcome::Unchanged { reason } = &outcome {
            warn!("{} left targets unchanged: {}", strategy, reason);
        }
        let updated = apply_targets(holdings, &outcome);
        Ok((outcome, updated))
    }

    pub async fn fx_analysis(&self, now: NaiveDateTime) -> Result<Option<FxAnalysis>> {
        Ok(self.fx_service.analysis(now.and_utc()).await?)
    }

    async fn translate_summaries(&self, translation: &SummaryTranslation, rows: &mut [ValuationRow]) {
        let translated = join_all(rows.iter().map(|row| async move {
            match row.business_summary.as_deref() {
                Some(text) => Some(
                    translate_or_original(
                        translation.translator.as_ref(),
                        text,
                        &translation.target_lang,
                    )
                    .await,
                ),
                None => None,
            }
        }))
        .await;

        for (row, summary) in rows.iter_mut().zip(translated) {
            if summary.is_some() {
                row.business_summary = summary;
            }
        }
        debug!("Translated summaries into '{}'", translation.target_lang);
    }
}
