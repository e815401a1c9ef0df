//! Market data models
//!
//! - `types` - Type aliases for common identifiers (ProviderId, Currency)
//! - `quote` - Daily price points, used for FX history
//! - `snapshot` - Point-in-time per-ticker data (MarketSnapshot, DividendPayment)

mod quote;
mod snapshot;
mod types;

pub use quote::Quote;
pub use snapshot::{DividendPayment, MarketSnapshot};
pub use types::{Currency, ProviderId, DEFAULT_QUOTE_CURRENCY};
