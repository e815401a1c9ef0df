use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RebalanceAction {
    Hold,
    Buy,
    Sell,
}

/// Free rebalancing proposal for one holding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalanceRow {
    pub ticker: String,
    pub current_value: Decimal,
    pub current_weight_pct: Decimal,
    pub target_ratio: Decimal,
    pub target_value: Decimal,
    /// Target minus current; positive means buy
    pub delta_value: Decimal,
    pub action: RebalanceAction,
    /// Shares to trade, always non-negative
    pub action_quantity: Decimal,
    /// Shares held once the target is reached
    pub target_quantity: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RebalancePlan {
    pub rows: Vec<RebalanceRow>,
    /// Monthly dividend expected once every row sits at its target
    pub projected_monthly_dividend: Decimal,
}

/// Purchase needed by one holding when selling is not allowed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuyOnlyRow {
    pub ticker: String,
    pub current_value: Decimal,
    pub buy_needed: Decimal,
    pub buy_quantity: Decimal,
    pub final_value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuyOnlyPlan {
    /// Smallest portfolio size at which every target is reachable by buying
    pub scaled_total: Decimal,
    pub rows: Vec<BuyOnlyRow>,
    pub total_additional_investment: Decimal,
}

impl BuyOnlyPlan {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Daily amounts to spread one buy-only plan over a number of days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DcaSchedule {
    pub days: u32,
    pub daily_total: Decimal,
    pub daily_by_ticker: Vec<(String, Decimal)>,
}
