use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OptimizationStrategy {
    /// Same weight for every holding
    EqualWeight,
    /// Weights proportional to dividend yield
    YieldMaximize,
}

impl OptimizationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationStrategy::EqualWeight => "equal-weight",
            OptimizationStrategy::YieldMaximize => "yield-maximize",
        }
    }
}

impl fmt::Display for OptimizationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationStrategy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "equal-weight" | "equal" => Ok(OptimizationStrategy::EqualWeight),
            "yield-maximize" | "yield" => Ok(OptimizationStrategy::YieldMaximize),
            other => Err(ValidationError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetAssignment {
    pub ticker: String,
    pub target_ratio: Decimal,
}

/// New targets produced by a strategy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OptimizationOutcome {
    Applied { targets: Vec<TargetAssignment> },
    /// Nothing to weight by; existing targets stay as they are
    Unchanged { reason: String },
}
