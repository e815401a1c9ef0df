use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{BuyOnlyPlan, BuyOnlyRow, DcaSchedule, RebalanceAction, RebalancePlan, RebalanceRow};
use crate::constants::{BUY_ONLY_MIN_PURCHASE, REBALANCE_HOLD_DEADBAND};
use crate::portfolio::aggregate::PortfolioTotals;
use crate::portfolio::valuation::ValuationRow;

/// Spreading horizons for dollar-cost averaging, in days.
pub const DCA_HORIZON_DAYS: [u32; 3] = [30, 90, 180];

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Buy/sell/hold per row toward `target_ratio` of the current total.
///
/// Rows without a target get a zero target value. Targets are not
/// normalized: ratios summing to less than 100 leave value unallocated.
pub fn calculate_rebalance(rows: &[ValuationRow], totals: &PortfolioTotals) -> RebalancePlan {
    let total_value = totals.total_value;
    if total_value <= Decimal::ZERO {
        return RebalancePlan::default();
    }

    let mut projected_monthly_dividend = Decimal::ZERO;
    let plan_rows: Vec<RebalanceRow> = rows
        .iter()
        .map(|row| {
            let target_value = total_value * row.target_ratio / Decimal::ONE_HUNDRED;
            let delta_value = target_value - row.market_value;
            let price = row.price_in_reporting_ccy();

            let (action_quantity, target_quantity) = if price > Decimal::ZERO {
                (delta_value.abs() / price, target_value / price)
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            };

            projected_monthly_dividend += target_quantity * row.dividend_per_share() / MONTHS_PER_YEAR;

            RebalanceRow {
                ticker: row.ticker.clone(),
                current_value: row.market_value,
                current_weight_pct: row.market_value / total_value * Decimal::ONE_HUNDRED,
                target_ratio: row.target_ratio,
                target_value,
                delta_value,
                action: classify(delta_value),
                action_quantity,
                target_quantity,
            }
        })
        .collect();

    RebalancePlan {
        rows: plan_rows,
        projected_monthly_dividend,
    }
}

fn classify(delta_value: Decimal) -> RebalanceAction {
    if delta_value.abs() <= REBALANCE_HOLD_DEADBAND {
        RebalanceAction::Hold
    } else if delta_value > Decimal::ZERO {
        RebalanceAction::Buy
    } else {
        RebalanceAction::Sell
    }
}

/// Purchases that reach every target without selling anything.
///
/// The portfolio is scaled up to the smallest total at which the most
/// over-weight holding sits exactly at its target; rows needing no more
/// than the minimum purchase are left out.
pub fn calculate_buy_only(rows: &[ValuationRow], totals: &PortfolioTotals) -> BuyOnlyPlan {
    if totals.total_value <= Decimal::ZERO {
        return BuyOnlyPlan::default();
    }

    let scaled_total = rows
        .iter()
        .filter(|r| r.target_ratio > Decimal::ZERO)
        .filter_map(required_total)
        .max()
        .unwrap_or(Decimal::ZERO);

    if scaled_total <= totals.total_value {
        debug!("Buy-only: current total already satisfies all targets");
        return BuyOnlyPlan::default();
    }

    let plan_rows: Vec<BuyOnlyRow> = rows
        .iter()
        .filter_map(|row| {
            let final_value = scaled_total
                .checked_mul(row.target_ratio)?
                .checked_div(Decimal::ONE_HUNDRED)?;
            let buy_needed = final_value - row.market_value;
            if buy_needed <= BUY_ONLY_MIN_PURCHASE {
                return None;
            }
            let price = row.price_in_reporting_ccy();
            let buy_quantity = if price > Decimal::ZERO {
                buy_needed / price
            } else {
                Decimal::ZERO
            };
            Some(BuyOnlyRow {
                ticker: row.ticker.clone(),
                current_value: row.market_value,
                buy_needed,
                buy_quantity,
                final_value,
            })
        })
        .collect();

    let total_additional_investment = plan_rows.iter().map(|r| r.buy_needed).sum();

    BuyOnlyPlan {
        scaled_total,
        rows: plan_rows,
        total_additional_investment,
    }
}

/// Portfolio total at which `row` sits exactly at its target weight.
///
/// `None` when the figure is not representable; such a row cannot bound
/// the scaled total.
fn required_total(row: &ValuationRow) -> Option<Decimal> {
    let total = row
        .target_ratio
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|weight| row.market_value.checked_div(weight));
    if total.is_none() {
        warn!(
            "Buy-only: {} target {} is unreachable, left out of the scaled total",
            row.ticker, row.target_ratio
        );
    }
    total
}

/// Daily investment needed to complete `plan` over each DCA horizon.
pub fn dca_schedules(plan: &BuyOnlyPlan) -> Vec<DcaSchedule> {
    if plan.is_empty() {
        return Vec::new();
    }
    DCA_HORIZON_DAYS
        .iter()
        .map(|&days| {
            let divisor = Decimal::from(days);
            DcaSchedule {
                days,
                daily_total: plan.total_additional_investment / divisor,
                daily_by_ticker: plan
                    .rows
                    .iter()
                    .map(|r| (r.ticker.clone(), r.buy_needed / divisor))
                    .collect(),
            }
        })
        .collect()
}
