use log::info;
use rust_decimal::Decimal;

use super::{OptimizationOutcome, OptimizationStrategy, TargetAssignment};
use crate::holdings::Holding;
use crate::portfolio::valuation::ValuationRow;

/// Compute new target ratios for `rows` under `strategy`.
///
/// Only targets change; quantities are never touched.
pub fn optimize_targets(rows: &[ValuationRow], strategy: OptimizationStrategy) -> OptimizationOutcome {
    if rows.is_empty() {
        return OptimizationOutcome::Unchanged {
            reason: "no holdings".to_string(),
        };
    }

    match strategy {
        OptimizationStrategy::EqualWeight => {
            let weight = Decimal::ONE_HUNDRED / Decimal::from(rows.len());
            OptimizationOutcome::Applied {
                targets: rows
                    .iter()
                    .map(|r| TargetAssignment {
                        ticker: r.ticker.clone(),
                        target_ratio: weight,
                    })
                    .collect(),
            }
        }
        OptimizationStrategy::YieldMaximize => {
            let total_yield: Decimal = rows.iter().map(|r| r.dividend_yield_pct).sum();
            if total_yield <= Decimal::ZERO {
                info!("Yield-maximize skipped: no holding has a dividend yield");
                return OptimizationOutcome::Unchanged {
                    reason: "total dividend yield is zero".to_string(),
                };
            }
            OptimizationOutcome::Applied {
                targets: rows
                    .iter()
                    .map(|r| TargetAssignment {
                        ticker: r.ticker.clone(),
                        target_ratio: Decimal::ONE_HUNDRED * r.dividend_yield_pct / total_yield,
                    })
                    .collect(),
            }
        }
    }
}

/// A new holdings list with assigned targets applied by ticker.
///
/// Holdings without an assignment keep their current target.
pub fn apply_targets(holdings: &[Holding], outcome: &OptimizationOutcome) -> Vec<Holding> {
    let OptimizationOutcome::Applied { targets } = outcome else {
        return holdings.to_vec();
    };
    holdings
        .iter()
        .map(|h| {
            let target_ratio = targets
                .iter()
                .find(|t| t.ticker == h.ticker)
                .map_or(h.target_ratio, |t| t.target_ratio);
            Holding {
                target_ratio,
                ..h.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(ticker: &str, yield_pct: Decimal) -> ValuationRow {
        ValuationRow {
            ticker: ticker.to_string(),
            quantity: dec!(1),
            target_ratio: dec!(10),
            currency: "USD".to_string(),
            current_price: dec!(100),
            applied_rate: dec!(1400),
            market_value: dec!(140000),
            annual_dividend: Decimal::ZERO,
            dividend_yield_pct: yield_pct,
            beta: None,
            fifty_two_week_high: None,
            fifty_two_week_low: None,
            target_price: None,
            recommendation_key: None,
            business_summary: None,
        }
    }

    fn targets(outcome: &OptimizationOutcome) -> Vec<Decimal> {
        match outcome {
            OptimizationOutcome::Applied { targets } => {
                targets.iter().map(|t| t.target_ratio).collect()
            }
            OptimizationOutcome::Unchanged { .. } => panic!("expected applied outcome"),
        }
    }

    #[test]
    fn test_equal_weight_four_holdings() {
        let rows = vec![
            row("A", dec!(1)),
            row("B", dec!(2)),
            row("C", dec!(3)),
            row("D", dec!(4)),
        ];
        let outcome = optimize_targets(&rows, OptimizationStrategy::EqualWeight);
        assert_eq!(targets(&outcome), vec![dec!(25); 4]);
    }

    #[test]
    fn test_yield_maximize_proportional() {
        let rows = vec![row("A", dec!(2)), row("B", dec!(4)), row("C", Decimal::ZERO)];

        let result = targets(&optimize_targets(&rows, OptimizationStrategy::YieldMaximize));

        assert_eq!(result[0].round_dp(2), dec!(33.33));
        assert_eq!(result[1].round_dp(2), dec!(66.67));
        assert_eq!(result[2], Decimal::ZERO);
        let sum: Decimal = result.iter().sum();
        assert_eq!(sum.round_dp(10), dec!(100));
    }

    #[test]
    fn test_yield_maximize_without_yield_is_noop() {
        let rows = vec![row("A", Decimal::ZERO), row("B", Decimal::ZERO)];
        let outcome = optimize_targets(&rows, OptimizationStrategy::YieldMaximize);
        assert!(matches!(outcome, OptimizationOutcome::Unchanged { .. }));

        let holdings = vec![Holding::new("A", dec!(1), dec!(70)), Holding::new("B", dec!(1), dec!(30))];
        assert_eq!(apply_targets(&holdings, &outcome), holdings);
    }

    #[test]
    fn test_apply_targets_keeps_quantities() {
        let holdings = vec![
            Holding::new("A", dec!(3), dec!(0)),
            Holding::new("B", dec!(7), dec!(0)),
            Holding::new("FAILED", dec!(1), dec!(15)),
        ];
        let rows = vec![row("A", dec!(1)), row("B", dec!(3))];

        let updated = apply_targets(&holdings, &optimize_targets(&rows, OptimizationStrategy::EqualWeight));

        assert_eq!(updated[0].quantity, dec!(3));
        assert_eq!(updated[0].target_ratio, dec!(50));
        assert_eq!(updated[1].target_ratio, dec!(50));
        assert_eq!(updated[2].target_ratio, dec!(15));
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(
            "equal-weight".parse::<OptimizationStrategy>().unwrap(),
            OptimizationStrategy::EqualWeight
        );
        assert_eq!(
            "Yield_Maximize".parse::<OptimizationStrategy>().unwrap(),
            OptimizationStrategy::YieldMaximize
        );
        assert!("momentum".parse::<OptimizationStrategy>().is_err());
    }

    #[test]
    fn test_empty_rows_is_noop() {
        let outcome = optimize_targets(&[], OptimizationStrategy::EqualWeight);
        assert!(matches!(outcome, OptimizationOutcome::Unchanged { .. }));
    }
}
