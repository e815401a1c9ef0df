use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::income::ProjectedDividend;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub total_value: Decimal,
    pub total_annual_dividend: Decimal,
    /// Annual dividend over value in percent, 0 for an empty portfolio
    pub blended_yield_pct: Decimal,
}

/// Projected payments falling in one calendar month (any year).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDividendGroup {
    pub month: u32,
    /// Ascending by pay date
    pub events: Vec<ProjectedDividend>,
    /// Events dated before now
    pub paid: Decimal,
    /// Events dated now or later
    pub pending: Decimal,
    pub total: Decimal,
}

/// The month containing "now", split into received and still expected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMonthSummary {
    pub month: u32,
    pub paid: Decimal,
    pub pending: Decimal,
    pub total: Decimal,
    pub events: Vec<ProjectedDividend>,
}

/// Cumulative dividend income after `years`, flat and with yearly growth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeForecastPoint {
    pub years: u32,
    pub flat: Decimal,
    pub with_growth: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomeForecast {
    pub growth_rate: Decimal,
    pub points: Vec<IncomeForecastPoint>,
}
