mod aggregate_model;
mod aggregator;

pub use aggregate_model::*;
pub use aggregator::*;
