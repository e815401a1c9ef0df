use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Finding, FindingKind};
use crate::portfolio::valuation::ValuationRow;

const LOW_YIELD_PCT: Decimal = dec!(2.0);
const HIGH_BETA: Decimal = dec!(1.5);
const NEAR_HIGH_POSITION: Decimal = dec!(0.90);
const NEAR_LOW_POSITION: Decimal = dec!(0.10);
pub const CONCENTRATION_LIMIT_PCT: Decimal = dec!(30);

/// Evaluate every advisory rule over the valued rows.
///
/// Each rule is independent; a rule that matches no holding is omitted.
pub fn evaluate_rules(rows: &[ValuationRow]) -> Vec<Finding> {
    let rules: [(FindingKind, fn(&ValuationRow) -> bool); 7] = [
        (FindingKind::LowYield, |r| r.dividend_yield_pct < LOW_YIELD_PCT),
        (FindingKind::HighRisk, |r| r.beta.is_some_and(|b| b > HIGH_BETA)),
        (FindingKind::AnalystStrongBuy, |r| recommendation_contains(r, "STRONG_BUY")),
        (FindingKind::AnalystSell, |r| recommendation_contains(r, "SELL")),
        (FindingKind::NearFiftyTwoWeekHigh, |r| {
            range_position(r).is_some_and(|p| p > NEAR_HIGH_POSITION)
        }),
        (FindingKind::NearFiftyTwoWeekLow, |r| {
            range_position(r).is_some_and(|p| p < NEAR_LOW_POSITION)
        }),
        (FindingKind::Concentration, |r| r.target_ratio > CONCENTRATION_LIMIT_PCT),
    ];

    rules
        .iter()
        .filter_map(|(kind, matches)| {
            let tickers: Vec<String> = rows
                .iter()
                .filter(|r| matches(r))
                .map(|r| r.ticker.clone())
                .collect();
            (!tickers.is_empty()).then_some(Finding {
                kind: *kind,
                tickers,
            })
        })
        .collect()
}

fn recommendation_contains(row: &ValuationRow, needle: &str) -> bool {
    row.recommendation_key
        .as_deref()
        .is_some_and(|key| key.to_uppercase().contains(needle))
}

/// Where the price sits in its 52-week range (0 at the low, 1 at the high).
///
/// Only defined when both bounds are positive and distinct.
pub fn range_position(row: &ValuationRow) -> Option<Decimal> {
    let high = row.fifty_two_week_high.filter(|h| *h > Decimal::ZERO)?;
    let low = row.fifty_two_week_low.filter(|l| *l > Decimal::ZERO)?;
    let span = high - low;
    if span.is_zero() {
        return None;
    }
    Some((row.current_price - low) / span)
}
