mod optimization_model;
mod strategy;

pub use optimization_model::*;
pub use strategy::*;
