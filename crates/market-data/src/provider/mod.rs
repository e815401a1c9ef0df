//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - Provider rate limiting configuration
//! - The Yahoo Finance implementation

mod rate_limit;
mod traits;

pub mod yahoo;

pub use rate_limit::RateLimit;
pub use traits::MarketDataProvider;
