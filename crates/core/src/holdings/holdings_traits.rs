use super::Holding;
use crate::errors::Result;
use chrono::NaiveDateTime;

/// Durable list of holdings.
///
/// The engine only reads an immutable snapshot of this list per pass; edits
/// go through `save` with the full replacement list.
pub trait HoldingsRepositoryTrait: Send + Sync {
    /// Load all holdings. An absent store is an empty list, not an error.
    fn load(&self) -> Result<Vec<Holding>>;

    /// Load a list that is about to be edited and saved back.
    ///
    /// Unlike `load`, an unreadable store is an error, so an edit can never
    /// replace rows it failed to read.
    fn load_for_update(&self) -> Result<Vec<Holding>>;

    /// Replace the stored list.
    fn save(&self, holdings: &[Holding]) -> Result<()>;

    /// Time of the last successful `save`, if recorded.
    fn last_updated(&self) -> Option<NaiveDateTime>;
}
