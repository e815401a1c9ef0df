use chrono::NaiveDateTime;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::{HoldingValuation, ValuationRow};
use crate::fx::applied_rate;
use crate::holdings::Holding;
use crate::portfolio::income::{project_dividends, trailing_year_dividend};
use yieldfolio_market_data::MarketSnapshot;

/// Values one holding against its snapshot.
///
/// Pure: identical inputs always give identical output. A zero price is
/// kept as "unavailable" and contributes zero value and zero yield.
pub fn calculate_valuation(
    holding: &Holding,
    snapshot: &MarketSnapshot,
    usd_rate: Decimal,
    now: NaiveDateTime,
) -> HoldingValuation {
    let rate = applied_rate(&snapshot.currency, usd_rate);
    let price = snapshot.current_price.max(Decimal::ZERO);
    let quantity = holding.quantity.max(Decimal::ZERO);

    let projection = project_dividends(
        &holding.ticker,
        &snapshot.dividend_history,
        snapshot.dividend_rate,
        quantity,
        rate,
        now,
    );

    let row = ValuationRow {
        ticker: holding.ticker.clone(),
        quantity,
        target_ratio: holding.target_ratio,
        currency: snapshot.currency.clone(),
        current_price: price,
        applied_rate: rate,
        market_value: market_value(&holding.ticker, price, quantity, rate),
        annual_dividend: projection.annual_dividend,
        dividend_yield_pct: dividend_yield_pct(snapshot, now),
        beta: snapshot.beta,
        fifty_two_week_high: snapshot.fifty_two_week_high,
        fifty_two_week_low: snapshot.fifty_two_week_low,
        target_price: snapshot.target_price,
        recommendation_key: snapshot.recommendation_key.clone(),
        business_summary: snapshot.business_summary.clone(),
    };

    debug!(
        "Valued {}: {} x {} @ {} = {}",
        row.ticker, quantity, price, rate, row.market_value
    );

    HoldingValuation {
        row,
        dividends: projection.events,
    }
}

fn market_value(ticker: &str, price: Decimal, quantity: Decimal, rate: Decimal) -> Decimal {
    price
        .checked_mul(quantity)
        .and_then(|v| v.checked_mul(rate))
        .unwrap_or_else(|| {
            warn!("{}: {} x {} @ {} overflows, valued at zero", ticker, quantity, price, rate);
            Decimal::ZERO
        })
}

/// Yield in percent: annual per-share dividend over price.
///
/// The per-share figure is the quoted rate, else the trailing year of
/// history. Without either, the provider's quoted yield is used. Zero when
/// the price is unavailable.
pub fn dividend_yield_pct(snapshot: &MarketSnapshot, now: NaiveDateTime) -> Decimal {
    if snapshot.current_price <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let per_share = snapshot
        .dividend_rate
        .filter(|r| !r.is_zero())
        .or_else(|| trailing_year_dividend(&snapshot.dividend_history, now.date()));

    let pct = match (per_share, snapshot.dividend_yield) {
        (Some(per_share), _) => per_share / snapshot.current_price * Decimal::ONE_HUNDRED,
        (None, Some(fraction)) => fraction * Decimal::ONE_HUNDRED,
        (None, None) => Decimal::ZERO,
    };
    pct.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use yieldfolio_market_data::DividendPayment;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_unrepresentable_value_is_zero() {
        let holding = Holding::new("HUGE", dec!(1000), dec!(10));
        let snapshot = MarketSnapshot::new("HUGE", Decimal::MAX, "USD");

        let valuation = calculate_valuation(&holding, &snapshot, dec!(1400), now());

        assert_eq!(valuation.row.market_value, Decimal::ZERO);
    }

    #[test]
    fn test_usd_holding_is_converted() {
        let holding = Holding::new("AAPL", dec!(10), dec!(20));
        let snapshot = MarketSnapshot::new("AAPL", dec!(150), "USD");

        let valuation = calculate_valuation(&holding, &snapshot, dec!(1400), now());

        assert_eq!(valuation.row.market_value, dec!(2100000));
        assert_eq!(valuation.row.applied_rate, dec!(1400));
        assert_eq!(valuation.row.price_in_reporting_ccy(), dec!(210000));
    }

    #[test]
    fn test_krw_holding_is_not_converted() {
        let holding = Holding::new("005930.KS", dec!(3), Decimal::ZERO);
        let snapshot = MarketSnapshot::new("005930.KS", dec!(71000), "KRW");

        let valuation = calculate_valuation(&holding, &snapshot, dec!(1400), now());

        assert_eq!(valuation.row.applied_rate, Decimal::ONE);
        assert_eq!(valuation.row.market_value, dec!(213000));
    }

    #[test]
    fn test_zero_price_contributes_nothing() {
        let holding = Holding::new("GONE", dec!(5), dec!(10));
        let snapshot = MarketSnapshot::new("GONE", Decimal::ZERO, "USD").with_dividend_rate(dec!(2));

        let valuation = calculate_valuation(&holding, &snapshot, dec!(1400), now());

        assert_eq!(valuation.row.market_value, Decimal::ZERO);
        assert_eq!(valuation.row.dividend_yield_pct, Decimal::ZERO);
    }

    #[test]
    fn test_yield_from_rate() {
        let snapshot = MarketSnapshot::new("SCHD", dec!(25), "USD").with_dividend_rate(dec!(1));
        assert_eq!(dividend_yield_pct(&snapshot, now()), dec!(4));
    }

    #[test]
    fn test_yield_from_trailing_history() {
        let snapshot = MarketSnapshot::new("O", dec!(50), "USD").with_history(vec![
            DividendPayment::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), dec!(1)),
            DividendPayment::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), dec!(1)),
        ]);
        assert_eq!(dividend_yield_pct(&snapshot, now()), dec!(4));
    }

    #[test]
    fn test_yield_from_quoted_fraction() {
        let snapshot = MarketSnapshot::new("VYM", dec!(120), "USD").with_dividend_yield(dec!(0.031));
        assert_eq!(dividend_yield_pct(&snapshot, now()), dec!(3.1));
    }

    #[test]
    fn test_valuation_is_idempotent() {
        let holding = Holding::new("JEPI", dec!(12.5), dec!(30));
        let snapshot = MarketSnapshot::new("JEPI", dec!(57.3), "USD")
            .with_dividend_rate(dec!(4.6))
            .with_beta(dec!(0.6));

        let first = calculate_valuation(&holding, &snapshot, dec!(1387.2), now());
        let second = calculate_valuation(&holding, &snapshot, dec!(1387.2), now());

        assert_eq!(first, second);
    }

    #[test]
    fn test_dividend_per_share_without_shares_uses_yield() {
        let holding = Holding::new("SCHD", Decimal::ZERO, dec!(50));
        let snapshot = MarketSnapshot::new("SCHD", dec!(25), "USD").with_dividend_rate(dec!(1));

        let row = calculate_valuation(&holding, &snapshot, dec!(1400), now()).row;

        // 25 * 1400 * 4%
        assert_eq!(row.dividend_per_share(), dec!(1400));
    }
}
