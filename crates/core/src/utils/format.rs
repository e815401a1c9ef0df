use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;

/// Formats an amount with a currency symbol and thousands separators.
///
/// KRW is shown without decimals (`₩1,234`); everything else as dollars
/// with `DISPLAY_DECIMAL_PRECISION` decimals (`$1,234.56`).
pub fn format_currency(value: Decimal, currency: &str) -> String {
    let (symbol, dp) = if currency.eq_ignore_ascii_case("KRW") {
        ("₩", 0)
    } else {
        ("$", DISPLAY_DECIMAL_PRECISION)
    };
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}", sign, symbol, group_thousands(rounded.abs(), dp))
}

fn group_thousands(value: Decimal, dp: u32) -> String {
    let text = format!("{:.*}", dp as usize, value);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
