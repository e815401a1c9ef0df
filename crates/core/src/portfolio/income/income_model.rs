use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One forecast payment for a holding, in the reporting currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedDividend {
    pub ticker: String,
    pub pay_date: NaiveDate,
    /// Calendar month 1..=12, year-agnostic for grouping
    pub pay_month: u32,
    pub amount: Decimal,
}

/// Forward 12-month dividend schedule for one holding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DividendProjection {
    /// Ascending by pay date
    pub events: Vec<ProjectedDividend>,
    pub annual_dividend: Decimal,
    /// True when the annual figure came from the per-share rate instead of events
    pub used_rate_fallback: bool,
}
