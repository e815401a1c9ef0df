//! FX module - the USD to reporting-currency rate and its technical analysis.

mod fx_analysis;
mod fx_errors;
mod fx_model;
mod fx_service;
mod fx_traits;

pub use fx_analysis::analyze_closes;
pub use fx_errors::FxError;
pub use fx_model::{applied_rate, FxAnalysis, FxRate, FxTrend, RsiStatus};
pub use fx_service::{FxService, MarketDataFxRateProvider};
pub use fx_traits::FxRateProviderTrait;
