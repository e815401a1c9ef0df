use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::income::ProjectedDividend;

/// One holding valued in the reporting currency for a single pass.
///
/// Carries the rate that was applied so downstream steps never back-derive it
/// from already converted values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRow {
    pub ticker: String,
    pub quantity: Decimal,
    pub target_ratio: Decimal,
    /// Quote currency of `current_price`
    pub currency: String,
    pub current_price: Decimal,
    pub applied_rate: Decimal,
    pub market_value: Decimal,
    pub annual_dividend: Decimal,
    pub dividend_yield_pct: Decimal,
    pub beta: Option<Decimal>,
    pub fifty_two_week_high: Option<Decimal>,
    pub fifty_two_week_low: Option<Decimal>,
    pub target_price: Option<Decimal>,
    pub recommendation_key: Option<String>,
    pub business_summary: Option<String>,
}

impl ValuationRow {
    /// Zero when the converted price is not representable.
    pub fn price_in_reporting_ccy(&self) -> Decimal {
        self.current_price
            .checked_mul(self.applied_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Annual dividend per share in the reporting currency.
    ///
    /// Uses the holding's own annual figure when it has shares, else the
    /// quoted yield applied to the converted price.
    pub fn dividend_per_share(&self) -> Decimal {
        if self.quantity > Decimal::ZERO {
            self.annual_dividend / self.quantity
        } else if self.current_price > Decimal::ZERO {
            self.price_in_reporting_ccy() * self.dividend_yield_pct / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

/// A valued holding together with its forward dividend schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingValuation {
    pub row: ValuationRow,
    pub dividends: Vec<ProjectedDividend>,
}
