use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::CONVERTED_CURRENCY;

/// The rate used for one computation pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxRate {
    pub rate: Decimal,
    /// True when the provider failed and the documented default was substituted.
    pub is_fallback: bool,
}

/// Multiplier that brings a quote in `currency` into the reporting currency.
///
/// Only USD is converted. Every other currency, the reporting currency
/// included, is taken as already in reporting units.
pub fn applied_rate(currency: &str, usd_rate: Decimal) -> Decimal {
    if currency.eq_ignore_ascii_case(CONVERTED_CURRENCY) {
        usd_rate
    } else {
        Decimal::ONE
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RsiStatus {
    Overbought,
    Oversold,
    Neutral,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FxTrend {
    Up,
    Down,
}

/// Technical indicators over daily USD to reporting-currency closes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FxAnalysis {
    pub current: Decimal,
    pub change: Decimal,
    pub change_pct: Decimal,
    /// 20-day simple moving average, absent with fewer than 20 closes
    pub ma20: Option<Decimal>,
    /// 60-day simple moving average, absent with fewer than 60 closes
    pub ma60: Option<Decimal>,
    /// 14-period RSI, absent with fewer than 15 closes or a flat window
    pub rsi: Option<Decimal>,
    pub rsi_status: RsiStatus,
    pub trend: FxTrend,
}
