mod analysis_model;
mod analysis_rules;
mod health;

pub use analysis_model::*;
pub use analysis_rules::*;
pub use health::*;
