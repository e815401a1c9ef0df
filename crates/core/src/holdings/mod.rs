mod csv_store;
mod holdings_errors;
mod holdings_model;
mod holdings_traits;

pub use csv_store::*;
pub use holdings_errors::*;
pub use holdings_model::*;
pub use holdings_traits::*;
