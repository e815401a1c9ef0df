use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency all aggregated figures are expressed in
pub const REPORTING_CURRENCY: &str = "KRW";

/// The only foreign currency converted with a fetched rate
pub const CONVERTED_CURRENCY: &str = "USD";

/// Provider symbol for the USD->KRW rate
pub const DEFAULT_FX_PAIR: &str = "KRW=X";

/// USD->KRW rate used when the rate provider fails
pub const FALLBACK_USD_KRW_RATE: Decimal = dec!(1400.0);

/// Free rebalancing: |delta| at or below this is Hold (reporting currency)
pub const REBALANCE_HOLD_DEADBAND: Decimal = dec!(10000);

/// Buy-only rebalancing: rows need more than this to be included (reporting currency)
pub const BUY_ONLY_MIN_PURCHASE: Decimal = dec!(1000);

/// Yearly dividend growth assumed by the income forecast
pub const DIVIDEND_GROWTH_RATE: Decimal = dec!(0.05);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
