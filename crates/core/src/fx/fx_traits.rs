use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::FxError;

/// Source of USD to reporting-currency rates.
#[async_trait]
pub trait FxRateProviderTrait: Send + Sync {
    /// Latest rate for a provider pair symbol such as `KRW=X`.
    async fn fetch_rate(&self, pair: &str) -> Result<Decimal, FxError>;

    /// Daily closes for the pair, oldest first.
    async fn fetch_closes(
        &self,
        pair: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Decimal>, FxError>;
}
