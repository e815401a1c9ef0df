//! Core error types for the Yieldfolio engine.
//!
//! Only boundary operations (holdings storage, fx lookups, input validation)
//! return errors. The numeric engine itself is total: division guards yield
//! zero or no-op results instead of failing.

use thiserror::Error;

use crate::fx::FxError;
use crate::holdings::HoldingsError;
use yieldfolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Holdings error: {0}")]
    Holdings(#[from] HoldingsError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Rejected user input. Raised at the boundary, never by the engine.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("Quantity for {ticker} must not be negative (got {quantity})")]
    NegativeQuantity { ticker: String, quantity: String },

    #[error("Target ratio for {ticker} must be within 0..=100 (got {ratio})")]
    TargetRatioOutOfRange { ticker: String, ratio: String },

    #[error("Unknown optimization strategy: {0}")]
    UnknownStrategy(String),
}
