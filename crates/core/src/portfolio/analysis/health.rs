use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{DiversificationGrade, HealthSummary, RiskGrade, Suggestion, YieldGrade};
use crate::portfolio::analysis::CONCENTRATION_LIMIT_PCT;
use crate::portfolio::valuation::ValuationRow;

/// High-dividend tickers suggested to portfolios that don't hold them.
pub const SUGGESTED_DIVIDEND_TICKERS: [&str; 4] = ["SCHD", "JEPI", "O", "VYM"];

const EXCELLENT_YIELD_PCT: Decimal = dec!(4.0);
const GOOD_YIELD_PCT: Decimal = dec!(2.5);
const RAISE_YIELD_BELOW_PCT: Decimal = dec!(3.0);
const STABLE_BETA: Decimal = dec!(1.0);
const MARKET_BETA: Decimal = dec!(1.3);
const WELL_DIVERSIFIED_COUNT: usize = 10;
const ADEQUATE_COUNT: usize = 5;
const SECTOR_SUGGESTION_ABOVE: usize = 3;

/// Portfolio-wide grades and improvement suggestions. `None` for an empty portfolio.
pub fn health_summary(rows: &[ValuationRow]) -> Option<HealthSummary> {
    if rows.is_empty() {
        return None;
    }
    let count = Decimal::from(rows.len());
    let average_yield_pct = rows.iter().map(|r| r.dividend_yield_pct).sum::<Decimal>() / count;
    let average_beta = rows
        .iter()
        .map(|r| r.beta.unwrap_or(Decimal::ZERO))
        .sum::<Decimal>()
        / count;
    let holding_count = rows.len();

    let yield_grade = if average_yield_pct >= EXCELLENT_YIELD_PCT {
        YieldGrade::Excellent
    } else if average_yield_pct >= GOOD_YIELD_PCT {
        YieldGrade::Good
    } else {
        YieldGrade::Low
    };

    let risk_grade = if average_beta < STABLE_BETA {
        RiskGrade::Stable
    } else if average_beta < MARKET_BETA {
        RiskGrade::Market
    } else {
        RiskGrade::High
    };

    let diversification_grade = if holding_count >= WELL_DIVERSIFIED_COUNT {
        DiversificationGrade::WellDiversified
    } else if holding_count >= ADEQUATE_COUNT {
        DiversificationGrade::Adequate
    } else {
        DiversificationGrade::Insufficient
    };

    let mut suggestions = Vec::new();
    if average_yield_pct < RAISE_YIELD_BELOW_PCT {
        suggestions.push(Suggestion::RaiseYield);
    }
    if holding_count < ADEQUATE_COUNT {
        suggestions.push(Suggestion::Diversify);
    }
    if holding_count > SECTOR_SUGGESTION_ABOVE {
        suggestions.push(Suggestion::SectorDiversification);
    }
    let target_sum: Decimal = rows.iter().map(|r| r.target_ratio).sum();
    let max_target = rows.iter().map(|r| r.target_ratio).max().unwrap_or(Decimal::ZERO);
    if target_sum > Decimal::ZERO && max_target > CONCENTRATION_LIMIT_PCT {
        suggestions.push(Suggestion::ReduceConcentration);
    }

    let suggested_tickers = SUGGESTED_DIVIDEND_TICKERS
        .iter()
        .filter(|t| !rows.iter().any(|r| r.ticker == **t))
        .map(|t| t.to_string())
        .collect();

    Some(HealthSummary {
        average_yield_pct,
        yield_grade,
        average_beta,
        risk_grade,
        holding_count,
        diversification_grade,
        suggestions,
        suggested_tickers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ticker: &str, yield_pct: Decimal, beta: Option<Decimal>, target: Decimal) -> ValuationRow {
        ValuationRow {
            ticker: ticker.to_string(),
            quantity: dec!(1),
            target_ratio: target,
            currency: "USD".to_string(),
            current_price: dec!(100),
            applied_rate: dec!(1400),
            market_value: dec!(140000),
            annual_dividend: Decimal::ZERO,
            dividend_yield_pct: yield_pct,
            beta,
            fifty_two_week_high: None,
            fifty_two_week_low: None,
            target_price: None,
            recommendation_key: None,
            business_summary: None,
        }
    }

    #[test]
    fn test_empty_portfolio_has_no_summary() {
        assert!(health_summary(&[]).is_none());
    }

    #[test]
    fn test_small_low_yield_portfolio() {
        let rows = vec![
            row("SCHD", dec!(3.5), Some(dec!(0.8)), dec!(40)),
            row("AAPL", dec!(0.5), Some(dec!(1.2)), dec!(60)),
        ];

        let summary = health_summary(&rows).unwrap();

        assert_eq!(summary.average_yield_pct, dec!(2));
        assert_eq!(summary.yield_grade, YieldGrade::Low);
        assert_eq!(summary.average_beta, dec!(1));
        assert_eq!(summary.risk_grade, RiskGrade::Market);
        assert_eq!(summary.diversification_grade, DiversificationGrade::Insufficient);
        assert_eq!(
            summary.suggestions,
            vec![
                Suggestion::RaiseYield,
                Suggestion::Diversify,
                Suggestion::ReduceConcentration
            ]
        );
        assert_eq!(summary.suggested_tickers, vec!["JEPI", "O", "VYM"]);
    }

    #[test]
    fn test_missing_beta_counts_as_zero() {
        let rows = vec![
            row("A", dec!(5), None, Decimal::ZERO),
            row("B", dec!(5), Some(dec!(1.8)), Decimal::ZERO),
        ];
        let summary = health_summary(&rows).unwrap();
        assert_eq!(summary.average_beta, dec!(0.9));
        assert_eq!(summary.risk_grade, RiskGrade::Stable);
        assert_eq!(summary.yield_grade, YieldGrade::Excellent);
    }

    #[test]
    fn test_concentration_needs_targets() {
        // A 0 sum never reports concentration; individual targets above 30 do
        let rows: Vec<ValuationRow> = (0..5)
            .map(|i| row(&format!("T{}", i), dec!(2.5), Some(dec!(1.5)), Decimal::ZERO))
            .collect();

        let summary = health_summary(&rows).unwrap();

        assert_eq!(summary.yield_grade, YieldGrade::Good);
        assert_eq!(summary.risk_grade, RiskGrade::High);
        assert_eq!(summary.diversification_grade, DiversificationGrade::Adequate);
        assert_eq!(
            summary.suggestions,
            vec![Suggestion::RaiseYield, Suggestion::SectorDiversification]
        );
        assert_eq!(summary.suggested_tickers.len(), 4);
    }

    #[test]
    fn test_well_diversified() {
        let rows: Vec<ValuationRow> = (0..10)
            .map(|i| row(&format!("T{}", i), dec!(4), Some(dec!(0.5)), dec!(10)))
            .collect();
        let summary = health_summary(&rows).unwrap();
        assert_eq!(summary.diversification_grade, DiversificationGrade::WellDiversified);
        assert_eq!(summary.suggestions, vec![Suggestion::SectorDiversification]);
    }
}
