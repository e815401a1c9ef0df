use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("No rate available for {0}")]
    RateUnavailable(String),

    #[error("Invalid rate for {pair}: {rate}")]
    InvalidRate { pair: String, rate: String },

    #[error("Market data error: {0}")]
    MarketData(#[from] yieldfolio_market_data::MarketDataError),
}
