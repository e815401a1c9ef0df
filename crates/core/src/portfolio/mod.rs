//! The valuation and rebalancing engine.
//!
//! Everything below `portfolio_service` is pure: the service fetches once,
//! then feeds one immutable snapshot through valuation, projection,
//! aggregation, rebalancing and the advisory rules.

pub mod aggregate;
pub mod analysis;
pub mod income;
pub mod optimization;
pub mod rebalancing;
pub mod valuation;

mod portfolio_model;
mod portfolio_service;

pub use portfolio_model::*;
pub use portfolio_service::*;
