use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historical per-share dividend payment (keyed by ex-date).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendPayment {
    pub ex_date: NaiveDate,
    pub amount: Decimal,
}

impl DividendPayment {
    pub fn new(ex_date: NaiveDate, amount: Decimal) -> Self {
        Self { ex_date, amount }
    }
}

/// Point-in-time market data for one ticker.
///
/// Immutable within one computation pass. A `current_price` of zero means the
/// provider had no usable price; downstream calculations treat it as
/// "unavailable" rather than as a real quote.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub ticker: String,

    pub current_price: Decimal,

    /// Quote currency (ISO 4217)
    pub currency: String,

    /// Annual per-share dividend estimate (trailing or forward)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_rate: Option<Decimal>,

    /// Dividend yield as a fraction (0.035 for 3.5%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_yield: Option<Decimal>,

    /// Chronological per-share payments, oldest first
    #[serde(default)]
    pub dividend_history: Vec<DividendPayment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_high: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifty_two_week_low: Option<Decimal>,

    /// Analyst mean target price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_price: Option<Decimal>,

    /// Analyst consensus key, uppercased (e.g. "STRONG_BUY")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_summary: Option<String>,
}

impl MarketSnapshot {
    /// Create a snapshot with only price and currency set
    pub fn new(ticker: impl Into<String>, current_price: Decimal, currency: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            current_price,
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_dividend_rate(mut self, rate: Decimal) -> Self {
        self.dividend_rate = Some(rate);
        self
    }

    pub fn with_dividend_yield(mut self, dividend_yield: Decimal) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    pub fn with_history(mut self, mut history: Vec<DividendPayment>) -> Self {
        history.sort_by_key(|p| p.ex_date);
        self.dividend_history = history;
        self
    }

    pub fn with_beta(mut self, beta: Decimal) -> Self {
        self.beta = Some(beta);
        self
    }

    pub fn with_52_week_range(mut self, low: Decimal, high: Decimal) -> Self {
        self.fifty_two_week_low = Some(low);
        self.fifty_two_week_high = Some(high);
        self
    }

    pub fn with_recommendation(mut self, key: impl Into<String>) -> Self {
        self.recommendation_key = Some(key.into().to_uppercase());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.business_summary = Some(summary.into());
        self
    }

    /// True when the provider returned no usable price.
    pub fn is_price_unavailable(&self) -> bool {
        self.current_price <= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_builder() {
        let snapshot = MarketSnapshot::new("SCHD", dec!(27.5), "USD")
            .with_dividend_rate(dec!(0.99))
            .with_beta(dec!(0.8))
            .with_recommendation("buy");

        assert_eq!(snapshot.ticker, "SCHD");
        assert_eq!(snapshot.dividend_rate, Some(dec!(0.99)));
        assert_eq!(snapshot.recommendation_key.as_deref(), Some("BUY"));
        assert!(!snapshot.is_price_unavailable());
    }

    #[test]
    fn test_history_is_sorted_chronologically() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        let snapshot = MarketSnapshot::new("O", dec!(55), "USD").with_history(vec![
            DividendPayment::new(d(3), dec!(0.26)),
            DividendPayment::new(d(1), dec!(0.26)),
            DividendPayment::new(d(2), dec!(0.26)),
        ]);

        let dates: Vec<_> = snapshot.dividend_history.iter().map(|p| p.ex_date).collect();
        assert_eq!(dates, vec![d(1), d(2), d(3)]);
    }

    #[test]
    fn test_zero_price_is_unavailable() {
        let snapshot = MarketSnapshot::new("DELISTED", Decimal::ZERO, "USD");
        assert!(snapshot.is_price_unavailable());
    }

    #[test]
    fn test_snapshot_serialization_skips_missing_fields() {
        let snapshot = MarketSnapshot::new("AAPL", dec!(150), "USD");
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("currentPrice"));
        assert!(!json.contains("beta"));
    }
}
