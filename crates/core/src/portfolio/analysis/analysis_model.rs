use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FindingKind {
    LowYield,
    HighRisk,
    AnalystStrongBuy,
    AnalystSell,
    NearFiftyTwoWeekHigh,
    NearFiftyTwoWeekLow,
    Concentration,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FindingSeverity {
    /// Something working in the portfolio's favour
    Positive,
    Warning,
}

impl FindingKind {
    pub fn severity(&self) -> FindingSeverity {
        match self {
            FindingKind::AnalystStrongBuy | FindingKind::NearFiftyTwoWeekLow => {
                FindingSeverity::Positive
            }
            _ => FindingSeverity::Warning,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FindingKind::LowYield => "Low dividend yield (under 2%)",
            FindingKind::HighRisk => "High risk (beta above 1.5)",
            FindingKind::AnalystStrongBuy => "Analyst strong buy",
            FindingKind::AnalystSell => "Analyst sell",
            FindingKind::NearFiftyTwoWeekHigh => "Near 52-week high, beware buying the top",
            FindingKind::NearFiftyTwoWeekLow => "Near 52-week low, possible entry point",
            FindingKind::Concentration => "Target weight above 30%",
        }
    }
}

/// One rule that matched, with the holdings it matched on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub tickers: Vec<String>,
}

impl Finding {
    pub fn severity(&self) -> FindingSeverity {
        self.kind.severity()
    }

    pub fn message(&self) -> String {
        format!("{}: {}", self.kind.label(), self.tickers.join(", "))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YieldGrade {
    Excellent,
    Good,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskGrade {
    Stable,
    Market,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiversificationGrade {
    WellDiversified,
    Adequate,
    Insufficient,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Suggestion {
    RaiseYield,
    Diversify,
    SectorDiversification,
    ReduceConcentration,
}

impl Suggestion {
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::RaiseYield => {
                "Average yield is low. Consider high-dividend ETFs (SCHD, VYM, JEPI) or dividend aristocrats."
            }
            Suggestion::Diversify => "Few holdings. Spreading across 5 to 10 positions reduces risk.",
            Suggestion::SectorDiversification => {
                "Spread across sectors such as IT, healthcare, REITs and consumer staples."
            }
            Suggestion::ReduceConcentration => "A single target weight is above 30%. Keeping each at 30% or less is safer.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub average_yield_pct: Decimal,
    pub yield_grade: YieldGrade,
    /// Missing betas count as zero
    pub average_beta: Decimal,
    pub risk_grade: RiskGrade,
    pub holding_count: usize,
    pub diversification_grade: DiversificationGrade,
    pub suggestions: Vec<Suggestion>,
    /// Well-known dividend tickers not already held
    pub suggested_tickers: Vec<String>,
}
