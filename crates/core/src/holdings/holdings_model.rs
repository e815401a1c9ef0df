use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One user-owned position: what is held and how much of the portfolio it should be.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub quantity: Decimal,
    /// Desired weight in percent (0..=100). 0 means "no target".
    #[serde(default)]
    pub target_ratio: Decimal,
}

impl Holding {
    pub fn new(ticker: &str, quantity: Decimal, target_ratio: Decimal) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            quantity,
            target_ratio,
        }
    }

    /// Reject input the engine assumes never reaches it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if self.quantity.is_sign_negative() && !self.quantity.is_zero() {
            return Err(ValidationError::NegativeQuantity {
                ticker: self.ticker.clone(),
                quantity: self.quantity.to_string(),
            });
        }
        if self.target_ratio < Decimal::ZERO || self.target_ratio > dec!(100) {
            return Err(ValidationError::TargetRatioOutOfRange {
                ticker: self.ticker.clone(),
                ratio: self.target_ratio.to_string(),
            });
        }
        Ok(())
    }
}

/// Tickers are stored trimmed and uppercased.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

/// Sum of all target ratios. Zero means targets have not been set.
pub fn target_ratio_sum(holdings: &[Holding]) -> Decimal {
    holdings.iter().map(|h| h.target_ratio).sum()
}
