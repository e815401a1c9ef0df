use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{FxAnalysis, FxTrend, RsiStatus};

const SHORT_MA_WINDOW: usize = 20;
const LONG_MA_WINDOW: usize = 60;
const RSI_PERIOD: usize = 14;
const RSI_OVERBOUGHT: Decimal = dec!(70);
const RSI_OVERSOLD: Decimal = dec!(30);

/// Derive indicators from daily closes, oldest first.
///
/// Returns `None` with fewer than two closes. Indicators whose window is not
/// yet filled are `None`; the trend is `Down` unless the current close is
/// above a known MA20.
pub fn analyze_closes(closes: &[Decimal]) -> Option<FxAnalysis> {
    if closes.len() < 2 {
        return None;
    }
    let current = closes[closes.len() - 1];
    let previous = closes[closes.len() - 2];
    let change = current - previous;
    let change_pct = if previous.is_zero() {
        Decimal::ZERO
    } else {
        change / previous * dec!(100)
    };

    let ma20 = simple_moving_average(closes, SHORT_MA_WINDOW);
    let ma60 = simple_moving_average(closes, LONG_MA_WINDOW);
    let rsi = relative_strength_index(closes, RSI_PERIOD);

    let rsi_status = match rsi {
        Some(v) if v >= RSI_OVERBOUGHT => RsiStatus::Overbought,
        Some(v) if v <= RSI_OVERSOLD => RsiStatus::Oversold,
        _ => RsiStatus::Neutral,
    };
    let trend = match ma20 {
        Some(ma) if current > ma => FxTrend::Up,
        _ => FxTrend::Down,
    };

    Some(FxAnalysis {
        current,
        change,
        change_pct,
        ma20,
        ma60,
        rsi,
        rsi_status,
        trend,
    })
}

fn simple_moving_average(values: &[Decimal], window: usize) -> Option<Decimal> {
    if window == 0 || values.len() < window {
        return None;
    }
    let sum: Decimal = values[values.len() - window..].iter().sum();
    Some(sum / Decimal::from(window))
}

/// RSI from simple rolling means of the last `period` gains and losses.
fn relative_strength_index(closes: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }
    let tail = &closes[closes.len() - period - 1..];
    let (gains, losses) = tail
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold((Decimal::ZERO, Decimal::ZERO), |(g, l), delta| {
            if delta > Decimal::ZERO {
                (g + delta, l)
            } else {
                (g, l - delta)
            }
        });

    let n = Decimal::from(period);
    let avg_gain = gains / n;
    let avg_loss = losses / n;

    if avg_loss.is_zero() {
        if avg_gain.is_zero() {
            return None;
        }
        return Some(dec!(100));
    }
    let rs = avg_gain / avg_loss;
    Some(dec!(100) - dec!(100) / (Decimal::ONE + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[i64]) -> Vec<Decimal> {
        values.iter().map(|v| Decimal::from(*v)).collect()
    }

    #[test]
    fn test_requires_two_closes() {
        assert!(analyze_closes(&[]).is_none());
        assert!(analyze_closes(&[dec!(1400)]).is_none());
    }

    #[test]
    fn test_change_and_short_history() {
        let analysis = analyze_closes(&[dec!(1400), dec!(1414)]).unwrap();
        assert_eq!(analysis.current, dec!(1414));
        assert_eq!(analysis.change, dec!(14));
        assert_eq!(analysis.change_pct, dec!(1));
        assert!(analysis.ma20.is_none());
        assert!(analysis.ma60.is_none());
        assert!(analysis.rsi.is_none());
        assert_eq!(analysis.rsi_status, RsiStatus::Neutral);
        assert_eq!(analysis.trend, FxTrend::Down);
    }

    #[test]
    fn test_rising_series_is_overbought_uptrend() {
        let closes: Vec<Decimal> = (0..30).map(|i| Decimal::from(1300 + i)).collect();
        let analysis = analyze_closes(&closes).unwrap();

        assert_eq!(analysis.rsi, Some(dec!(100)));
        assert_eq!(analysis.rsi_status, RsiStatus::Overbought);
        // MA20 of 1310..=1329
        assert_eq!(analysis.ma20, Some(dec!(1319.5)));
        assert_eq!(analysis.trend, FxTrend::Up);
    }

    #[test]
    fn test_falling_series_is_oversold() {
        let closes: Vec<Decimal> = (0..20).map(|i| Decimal::from(1500 - i)).collect();
        let analysis = analyze_closes(&closes).unwrap();

        assert_eq!(analysis.rsi, Some(Decimal::ZERO));
        assert_eq!(analysis.rsi_status, RsiStatus::Oversold);
        assert_eq!(analysis.trend, FxTrend::Down);
    }

    #[test]
    fn test_balanced_moves_give_neutral_rsi() {
        // 14 deltas alternating +10 / -10
        let mut closes = vec![1400];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 10 } else { last - 10 });
        }
        let analysis = analyze_closes(&series(&closes)).unwrap();

        assert_eq!(analysis.rsi, Some(dec!(50)));
        assert_eq!(analysis.rsi_status, RsiStatus::Neutral);
    }

    #[test]
    fn test_flat_window_has_no_rsi() {
        let closes = vec![dec!(1400); 20];
        let analysis = analyze_closes(&closes).unwrap();
        assert!(analysis.rsi.is_none());
        assert_eq!(analysis.ma20, Some(dec!(1400)));
        assert_eq!(analysis.trend, FxTrend::Down);
    }

    #[test]
    fn test_ma60_needs_sixty_closes() {
        let closes = vec![dec!(1350); 60];
        let analysis = analyze_closes(&closes).unwrap();
        assert_eq!(analysis.ma60, Some(dec!(1350)));
    }
}
