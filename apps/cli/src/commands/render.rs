//! Plain-text presentation of a computation pass.

use std::fmt::Write;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use yieldfolio_core::analysis::FindingSeverity;
use yieldfolio_core::constants::DISPLAY_DECIMAL_PRECISION;
use yieldfolio_core::fx::{FxAnalysis, FxTrend, RsiStatus};
use yieldfolio_core::rebalancing::RebalanceAction;
use yieldfolio_core::utils::format::format_currency;
use yieldfolio_core::PortfolioReport;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

fn rounded(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DECIMAL_PRECISION)
}

fn pct(value: Decimal) -> String {
    format!(
        "{:.*}%",
        DISPLAY_DECIMAL_PRECISION as usize,
        rounded(value)
    )
}

pub fn render_report(report: &PortfolioReport, last_updated: Option<NaiveDateTime>) -> String {
    let ccy = report.reporting_currency.as_str();
    let mut out = String::new();

    let _ = writeln!(out, "== Portfolio ({}) ==", report.generated_at.format("%Y-%m-%d %H:%M"));
    if let Some(updated) = last_updated {
        let _ = writeln!(out, "Holdings last updated {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }
    let _ = writeln!(
        out,
        "USD/{} {}{}",
        ccy,
        rounded(report.fx_rate.rate),
        if report.fx_rate.is_fallback { " (default)" } else { "" }
    );
    let _ = writeln!(out, "Total value       {}", format_currency(report.totals.total_value, ccy));
    let _ = writeln!(
        out,
        "Annual dividend   {}  (monthly {})",
        format_currency(report.totals.total_annual_dividend, ccy),
        format_currency(report.totals.total_annual_dividend / Decimal::from(12), ccy)
    );
    let _ = writeln!(out, "Yield             {}", pct(report.totals.blended_yield_pct));

    if !report.rows.is_empty() {
        let _ = writeln!(out, "\n-- Holdings --");
        for row in &report.rows {
            let _ = writeln!(
                out,
                "{:<10} {:>10} x {:>12} {:<4} = {:>16}  div {:>14}  yield {:>7}  target {}",
                row.ticker,
                row.quantity.normalize(),
                rounded(row.current_price),
                row.currency,
                format_currency(row.market_value, ccy),
                format_currency(row.annual_dividend, ccy),
                pct(row.dividend_yield_pct),
                pct(row.target_ratio)
            );
        }
    }

    let cm = &report.current_month;
    let _ = writeln!(out, "\n-- {} dividends --", month_name(cm.month));
    let _ = writeln!(
        out,
        "paid {}  pending {}  total {}",
        format_currency(cm.paid, ccy),
        format_currency(cm.pending, ccy),
        format_currency(cm.total, ccy)
    );
    for event in &cm.events {
        let _ = writeln!(
            out,
            "  {} {:<10} {}",
            event.pay_date,
            event.ticker,
            format_currency(event.amount, ccy)
        );
    }

    let forecast = &report.income_forecast;
    if report.totals.total_annual_dividend > Decimal::ZERO && !forecast.points.is_empty() {
        let _ = writeln!(
            out,
            "\n-- Income forecast (flat / {} yearly growth) --",
            pct(forecast.growth_rate * Decimal::ONE_HUNDRED)
        );
        for point in &forecast.points {
            let _ = writeln!(
                out,
                "{} yr  {:>16}  {:>16}",
                point.years,
                format_currency(point.flat, ccy),
                format_currency(point.with_growth, ccy)
            );
        }
    }

    if !report.monthly_dividends.is_empty() {
        let _ = writeln!(out, "\n-- Monthly schedule --");
        for group in &report.monthly_dividends {
            let _ = writeln!(out, "{}  {}", month_name(group.month), format_currency(group.total, ccy));
        }
    }

    if let Some(plan) = &report.rebalance {
        let _ = writeln!(out, "\n-- Rebalancing --");
        for row in &plan.rows {
            let action = match row.action {
                RebalanceAction::Hold => "HOLD".to_string(),
                RebalanceAction::Buy => format!("BUY {}", rounded(row.action_quantity)),
                RebalanceAction::Sell => format!("SELL {}", rounded(row.action_quantity)),
            };
            let _ = writeln!(
                out,
                "{:<10} {:>7} -> {:>7}  {:>16}  {}",
                row.ticker,
                pct(row.current_weight_pct),
                pct(row.target_ratio),
                format_currency(row.delta_value, ccy),
                action
            );
        }
        let _ = writeln!(
            out,
            "Monthly dividend at target {}",
            format_currency(plan.projected_monthly_dividend, ccy)
        );
    }

    if let Some(plan) = &report.buy_only {
        let _ = writeln!(out, "\n-- Buy-only --");
        if plan.is_empty() {
            let _ = writeln!(out, "No additional purchases needed");
        } else {
            let _ = writeln!(
                out,
                "Additional investment {}",
                format_currency(plan.total_additional_investment, ccy)
            );
            for row in &plan.rows {
                let _ = writeln!(
                    out,
                    "{:<10} {:>16}  {} shares",
                    row.ticker,
                    format_currency(row.buy_needed, ccy),
                    rounded(row.buy_quantity)
                );
            }
            for schedule in &report.dca {
                let _ = writeln!(
                    out,
                    "over {:>3} days: {} per day",
                    schedule.days,
                    format_currency(schedule.daily_total, ccy)
                );
            }
        }
    }

    if !report.findings.is_empty() {
        let _ = writeln!(out, "\n-- Findings --");
        for finding in &report.findings {
            let marker = match finding.severity() {
                FindingSeverity::Positive => "+",
                FindingSeverity::Warning => "!",
            };
            let _ = writeln!(out, "{} {}", marker, finding.message());
        }
    }

    if let Some(health) = &report.health {
        let _ = writeln!(out, "\n-- Health --");
        let _ = writeln!(
            out,
            "avg yield {} ({:?})  avg beta {} ({:?})  holdings {} ({:?})",
            pct(health.average_yield_pct),
            health.yield_grade,
            rounded(health.average_beta),
            health.risk_grade,
            health.holding_count,
            health.diversification_grade
        );
        for suggestion in &health.suggestions {
            let _ = writeln!(out, "* {}", suggestion.message());
        }
        if !health.suggested_tickers.is_empty() {
            let _ = writeln!(out, "Ideas: {}", health.suggested_tickers.join(", "));
        }
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\n-- Warnings --");
        for warning in &report.warnings {
            let _ = writeln!(out, "! {}", warning);
        }
    }

    out
}

pub fn render_fx(pair: &str, analysis: Option<&FxAnalysis>) -> String {
    let Some(a) = analysis else {
        return format!("No exchange rate history for {}\n", pair);
    };
    let opt = |v: Option<Decimal>| v.map_or_else(|| "n/a".to_string(), |v| rounded(v).to_string());
    let status = match a.rsi_status {
        RsiStatus::Overbought => "overbought, consider selling USD",
        RsiStatus::Oversold => "oversold, buying opportunity",
        RsiStatus::Neutral => "neutral",
    };
    let trend = match a.trend {
        FxTrend::Up => "up",
        FxTrend::Down => "down / correcting",
    };
    format!(
        "{}: {} ({:+} / {:+}%)\nMA20 {}  MA60 {}\nRSI(14) {} - {}\nTrend {}\n",
        pair,
        rounded(a.current),
        rounded(a.change),
        rounded(a.change_pct),
        opt(a.ma20),
        opt(a.ma60),
        opt(a.rsi),
        status,
        trend
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "Jan");
        assert_eq!(month_name(12), "Dec");
        assert_eq!(month_name(0), "?");
    }

    #[test]
    fn test_pct_uses_display_precision() {
        assert_eq!(pct(dec!(4.567)), "4.57%");
        assert_eq!(pct(dec!(3)), "3.00%");
    }

    #[test]
    fn test_render_fx_without_history() {
        assert_eq!(render_fx("KRW=X", None), "No exchange rate history for KRW=X\n");
    }

    #[test]
    fn test_render_fx() {
        let analysis = FxAnalysis {
            current: dec!(1400),
            change: dec!(-5),
            change_pct: dec!(-0.36),
            ma20: Some(dec!(1390)),
            ma60: None,
            rsi: Some(dec!(55.5)),
            rsi_status: RsiStatus::Neutral,
            trend: FxTrend::Up,
        };
        let text = render_fx("KRW=X", Some(&analysis));
        assert!(text.contains("MA60 n/a"));
        assert!(text.contains("RSI(14) 55.5 - neutral"));
        assert!(text.contains("Trend up"));
    }
}
