//! Yieldfolio Core - the dividend portfolio engine.
//!
//! Holdings go in; valuations in the reporting currency, a forward 12-month
//! dividend schedule, rebalancing plans and advisory findings come out.
//! Market data, FX rates and translation are reached through traits so the
//! engine itself stays pure and testable.

pub mod constants;
pub mod errors;
pub mod fx;
pub mod holdings;
pub mod portfolio;
pub mod utils;

pub use holdings::{CsvHoldingsStore, Holding, HoldingsRepositoryTrait};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
