mod dividend_projection;
mod income_model;

pub use dividend_projection::*;
pub use income_model::*;
