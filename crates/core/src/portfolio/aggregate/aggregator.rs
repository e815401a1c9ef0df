use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime};
use log::warn;
use rust_decimal::Decimal;

use super::{CurrentMonthSummary, IncomeForecast, IncomeForecastPoint, MonthlyDividendGroup, PortfolioTotals};
use crate::constants::DIVIDEND_GROWTH_RATE;
use crate::portfolio::income::ProjectedDividend;
use crate::portfolio::valuation::ValuationRow;
use crate::utils::time_utils::start_of_day;

pub fn calculate_totals(rows: &[ValuationRow]) -> PortfolioTotals {
    let total_value: Decimal = rows.iter().map(|r| r.market_value).sum();
    let total_annual_dividend: Decimal = rows.iter().map(|r| r.annual_dividend).sum();
    let blended_yield_pct = if total_value > Decimal::ZERO {
        total_annual_dividend / total_value * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    PortfolioTotals {
        total_value,
        total_annual_dividend,
        blended_yield_pct,
    }
}

/// Group events by calendar month, ascending; only months with events appear.
///
/// An event is paid when its date is before `now`.
pub fn group_by_month(events: &[ProjectedDividend], now: NaiveDateTime) -> Vec<MonthlyDividendGroup> {
    let mut months: BTreeMap<u32, Vec<ProjectedDividend>> = BTreeMap::new();
    for event in events {
        months.entry(event.pay_month).or_default().push(event.clone());
    }

    months
        .into_iter()
        .map(|(month, mut events)| {
            events.sort_by(|a, b| a.pay_date.cmp(&b.pay_date));
            let (paid, pending) = split_paid(&events, now);
            MonthlyDividendGroup {
                month,
                events,
                paid,
                pending,
                total: paid + pending,
            }
        })
        .collect()
}

pub fn current_month_summary(events: &[ProjectedDividend], now: NaiveDateTime) -> CurrentMonthSummary {
    let month = now.month();
    let mut current: Vec<ProjectedDividend> = events
        .iter()
        .filter(|e| e.pay_month == month)
        .cloned()
        .collect();
    current.sort_by(|a, b| a.pay_date.cmp(&b.pay_date));
    let (paid, pending) = split_paid(&current, now);
    CurrentMonthSummary {
        month,
        paid,
        pending,
        total: paid + pending,
        events: current,
    }
}

fn split_paid(events: &[ProjectedDividend], now: NaiveDateTime) -> (Decimal, Decimal) {
    events
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(paid, pending), e| {
            if start_of_day(e.pay_date) < now {
                (paid + e.amount, pending)
            } else {
                (paid, pending + e.amount)
            }
        })
}

/// Forecast horizons, in years.
pub const FORECAST_HORIZON_YEARS: [u32; 3] = [1, 3, 5];

/// Cumulative income at each horizon from the current annual dividend.
///
/// The flat figure repeats the current amount every year. The growth figure
/// sums `annual * (1 + g)^i` for `i` in `1..=n`, except at one year where it
/// is the current amount.
pub fn income_forecast(total_annual_dividend: Decimal) -> IncomeForecast {
    let points = FORECAST_HORIZON_YEARS
        .iter()
        .map(|&years| IncomeForecastPoint {
            years,
            flat: total_annual_dividend * Decimal::from(years),
            with_growth: if years <= 1 {
                total_annual_dividend
            } else {
                grown_cumulative(total_annual_dividend, years)
            },
        })
        .collect();
    IncomeForecast {
        growth_rate: DIVIDEND_GROWTH_RATE,
        points,
    }
}

fn grown_cumulative(annual: Decimal, years: u32) -> Decimal {
    let step = Decimal::ONE + DIVIDEND_GROWTH_RATE;
    let mut factor = Decimal::ONE;
    let mut total = Decimal::ZERO;
    for _ in 0..years {
        let next = factor
            .checked_mul(step)
            .and_then(|f| annual.checked_mul(f).map(|amount| (f, amount)))
            .and_then(|(f, amount)| total.checked_add(amount).map(|t| (f, t)));
        match next {
            Some((f, t)) => {
                factor = f;
                total = t;
            }
            None => {
                warn!("Income forecast overflowed after {} years", years);
                return total;
            }
        }
    }
    total
}
