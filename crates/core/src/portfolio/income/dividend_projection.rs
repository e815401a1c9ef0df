use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;

use super::{DividendProjection, ProjectedDividend};
use crate::utils::time_utils::{add_years, month_start, sub_years};
use yieldfolio_market_data::DividendPayment;

/// Years of history considered for roll-forward.
pub const PROJECTION_LOOKBACK_YEARS: u32 = 2;

/// Roll each historical payment forward by whole years into
/// `[month start, month start + 12 months]` and value it for `quantity`.
///
/// Payments sharing an ex-date (a regular and a special dividend) are
/// added together. When payments from different years land on the same
/// projected date the most recent year wins, so a full extra year of
/// history never double-counts a payment.
/// Without any projected event the annual figure falls back to
/// `dividend_rate * quantity * applied_rate`, deriving the rate from the
/// trailing year of history when absent.
pub fn project_dividends(
    ticker: &str,
    history: &[DividendPayment],
    dividend_rate: Option<Decimal>,
    quantity: Decimal,
    applied_rate: Decimal,
    now: NaiveDateTime,
) -> DividendProjection {
    let today = now.date();
    let window_start = month_start(today);
    let window_end = add_years(window_start, 1);
    let lookback_start = sub_years(today, PROJECTION_LOOKBACK_YEARS);

    let mut by_ex_date: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for payment in history.iter().filter(|p| p.ex_date >= lookback_start) {
        *by_ex_date.entry(payment.ex_date).or_default() += payment.amount;
    }

    let mut by_date: BTreeMap<NaiveDate, (NaiveDate, Decimal)> = BTreeMap::new();
    for (ex_date, amount) in by_ex_date {
        let Some(pay_date) = roll_forward(ex_date, window_start) else {
            continue;
        };
        if pay_date > window_end {
            continue;
        }
        // ex-dates ascend, so a later insert is always the newer year
        by_date.insert(pay_date, (ex_date, amount));
    }

    let events: Vec<ProjectedDividend> = by_date
        .into_iter()
        .map(|(pay_date, (_, per_share))| ProjectedDividend {
            ticker: ticker.to_string(),
            pay_date,
            pay_month: pay_date.month(),
            amount: per_share * quantity * applied_rate,
        })
        .collect();

    let projected: Decimal = events.iter().map(|e| e.amount).sum();
    if projected > Decimal::ZERO {
        return DividendProjection {
            events,
            annual_dividend: projected,
            used_rate_fallback: false,
        };
    }

    let rate = dividend_rate
        .filter(|r| !r.is_zero())
        .or_else(|| trailing_year_dividend(history, today))
        .unwrap_or(Decimal::ZERO);
    debug!(
        "{}: no projected events, using per-share rate {}",
        ticker, rate
    );
    DividendProjection {
        events,
        annual_dividend: rate * quantity * applied_rate,
        used_rate_fallback: true,
    }
}

/// Sum of per-share payments over the year ending `today`, if any were made.
pub fn trailing_year_dividend(history: &[DividendPayment], today: NaiveDate) -> Option<Decimal> {
    let since = sub_years(today, 1);
    let recent: Vec<Decimal> = history
        .iter()
        .filter(|p| p.ex_date >= since && p.ex_date <= today)
        .map(|p| p.amount)
        .collect();
    if recent.is_empty() {
        None
    } else {
        Some(recent.into_iter().sum())
    }
}

fn roll_forward(mut date: NaiveDate, window_start: NaiveDate) -> Option<NaiveDate> {
    while date < window_start {
        let next = add_years(date, 1);
        if next <= date {
            return None;
        }
        date = next;
    }
    Some(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn at(date: NaiveDate) -> NaiveDateTime {
        date.and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_thirteen_monthly_payments_yield_twelve_events() {
        let now = at(d(2025, 10, 19));
        let history: Vec<DividendPayment> = (1..=13)
            .map(|i| {
                DividendPayment::new(
                    d(2025, 10, 15).checked_sub_months(Months::new(i)).unwrap(),
                    dec!(100),
                )
            })
            .collect();

        let projection = project_dividends("O", &history, None, dec!(10), Decimal::ONE, now);

        assert_eq!(projection.events.len(), 12);
        assert!(projection.events.iter().all(|e| e.amount == dec!(1000)));
        assert_eq!(projection.annual_dividend, dec!(12000));
        assert!(!projection.used_rate_fallback);
        for event in &projection.events {
            assert!(event.pay_date >= d(2025, 10, 1) && event.pay_date <= d(2026, 10, 1));
        }
    }

    #[test]
    fn test_events_are_sorted_and_rolled_forward() {
        let now = at(d(2025, 10, 19));
        let history = vec![
            DividendPayment::new(d(2024, 12, 10), dec!(0.5)),
            DividendPayment::new(d(2025, 3, 10), dec!(0.5)),
            DividendPayment::new(d(2025, 6, 10), dec!(0.5)),
            DividendPayment::new(d(2025, 9, 10), dec!(0.6)),
        ];

        let projection = project_dividends("SCHD", &history, None, dec!(100), dec!(1400), now);

        let dates: Vec<NaiveDate> = projection.events.iter().map(|e| e.pay_date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 12, 10), d(2026, 3, 10), d(2026, 6, 10), d(2026, 9, 10)]
        );
        assert_eq!(projection.events[3].amount, dec!(84000));
        assert_eq!(projection.events[0].pay_month, 12);
        assert_eq!(projection.annual_dividend, dec!(294000));
    }

    #[test]
    fn test_same_ex_date_payments_are_added() {
        let now = at(d(2025, 10, 19));
        let history = vec![
            DividendPayment::new(d(2025, 3, 10), dec!(1)),
            DividendPayment::new(d(2025, 3, 10), dec!(0.5)),
        ];

        let projection = project_dividends("KO", &history, None, dec!(10), Decimal::ONE, now);

        assert_eq!(projection.events.len(), 1);
        assert_eq!(projection.events[0].pay_date, d(2026, 3, 10));
        assert_eq!(projection.annual_dividend, dec!(15));
    }

    #[test]
    fn test_newest_year_wins_on_shared_projected_date() {
        let now = at(d(2025, 10, 19));
        let history = vec![
            DividendPayment::new(d(2024, 3, 10), dec!(0.8)),
            DividendPayment::new(d(2024, 3, 10), dec!(0.1)),
            DividendPayment::new(d(2025, 3, 10), dec!(1)),
        ];

        let projection = project_dividends("KO", &history, None, dec!(10), Decimal::ONE, now);

        assert_eq!(projection.events.len(), 1);
        assert_eq!(projection.annual_dividend, dec!(10));
    }

    #[test]
    fn test_current_month_payment_stays_in_place() {
        let now = at(d(2025, 10, 19));
        let history = vec![DividendPayment::new(d(2025, 10, 2), dec!(1))];

        let projection = project_dividends("T", &history, None, dec!(1), Decimal::ONE, now);

        assert_eq!(projection.events[0].pay_date, d(2025, 10, 2));
    }

    #[test]
    fn test_history_older_than_lookback_is_ignored() {
        let now = at(d(2025, 10, 19));
        let history = vec![DividendPayment::new(d(2023, 6, 1), dec!(2))];

        let projection = project_dividends("T", &history, None, dec!(1), Decimal::ONE, now);

        assert!(projection.events.is_empty());
        assert!(projection.used_rate_fallback);
        assert_eq!(projection.annual_dividend, Decimal::ZERO);
    }

    #[test]
    fn test_empty_history_falls_back_to_rate() {
        let now = at(d(2025, 10, 19));

        let projection =
            project_dividends("AAPL", &[], Some(dec!(1.04)), dec!(10), dec!(1400), now);

        assert!(projection.events.is_empty());
        assert!(projection.used_rate_fallback);
        assert_eq!(projection.annual_dividend, dec!(14560));
    }

    #[test]
    fn test_zero_quantity_uses_fallback_and_yields_zero() {
        let now = at(d(2025, 10, 19));
        let history = vec![DividendPayment::new(d(2025, 9, 1), dec!(1))];

        let projection = project_dividends("T", &history, Some(dec!(4)), Decimal::ZERO, Decimal::ONE, now);

        assert_eq!(projection.annual_dividend, Decimal::ZERO);
    }

    #[test]
    fn test_trailing_year_dividend() {
        let today = d(2025, 10, 19);
        let history = vec![
            DividendPayment::new(d(2024, 9, 1), dec!(5)),
            DividendPayment::new(d(2024, 11, 1), dec!(1)),
            DividendPayment::new(d(2025, 5, 1), dec!(1.5)),
        ];
        assert_eq!(trailing_year_dividend(&history, today), Some(dec!(2.5)));
        assert_eq!(trailing_year_dividend(&[], today), None);
    }
}
