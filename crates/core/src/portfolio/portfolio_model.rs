use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fx::FxRate;
use crate::portfolio::aggregate::{
    CurrentMonthSummary, IncomeForecast, MonthlyDividendGroup, PortfolioTotals,
};
use crate::portfolio::analysis::{Finding, HealthSummary};
use crate::portfolio::income::ProjectedDividend;
use crate::portfolio::rebalancing::{BuyOnlyPlan, DcaSchedule, RebalancePlan};
use crate::portfolio::valuation::ValuationRow;

/// Non-fatal degradations encountered during a pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PassWarning {
    /// The ticker was dropped from every figure in the report
    TickerFetchFailed { ticker: String, reason: String },
    /// The ticker is kept with zero value
    PriceUnavailable { ticker: String },
    FxFallbackUsed { rate: Decimal },
    /// Target ratios sum to zero, so no rebalancing was computed
    TargetsNotSet,
}

impl fmt::Display for PassWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassWarning::TickerFetchFailed { ticker, reason } => {
                write!(f, "{} excluded: {}", ticker, reason)
            }
            PassWarning::PriceUnavailable { ticker } => {
                write!(f, "{} has no current price and is valued at zero", ticker)
            }
            PassWarning::FxFallbackUsed { rate } => {
                write!(f, "Exchange rate unavailable, using default {}", rate)
            }
            PassWarning::TargetsNotSet => write!(f, "Target ratios are not set"),
        }
    }
}

/// Everything one computation pass produces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub generated_at: NaiveDateTime,
    pub reporting_currency: String,
    pub fx_rate: FxRate,
    /// One per successfully fetched holding, in input order
    pub rows: Vec<ValuationRow>,
    pub totals: PortfolioTotals,
    /// Ascending by pay date
    pub dividend_events: Vec<ProjectedDividend>,
    pub monthly_dividends: Vec<MonthlyDividendGroup>,
    pub current_month: CurrentMonthSummary,
    pub income_forecast: IncomeForecast,
    pub rebalance: Option<RebalancePlan>,
    pub buy_only: Option<BuyOnlyPlan>,
    pub dca: Vec<DcaSchedule>,
    pub findings: Vec<Finding>,
    pub health: Option<HealthSummary>,
    pub warnings: Vec<PassWarning>,
}
