//! Storage boundary for holding history entries.

use async_trait::async_trait;

use super::HoldingHistoryEntry;
use crate::errors::Result;
use crate::holdings::Holding;
use crate::months::Month;

/// Repository trait for monthly holding snapshots.
///
/// The store does not enforce one entry per (holding, month); the
/// reconciliation engine does, by reading before it writes.
#[async_trait]
pub trait HoldingHistoryRepositoryTrait: Send + Sync {
    /// All entries recorded for the month, across holdings.
    async fn get_by_month(&self, month: Month) -> Result<Vec<HoldingHistoryEntry>>;

    async fn get_by_holding_and_month(
        &self,
        holding: &Holding,
        month: Month,
    ) -> Result<Option<HoldingHistoryEntry>>;

    /// Inserts or replaces the entry for its (holding, month). Returns the id.
    async fn upsert(&self, entry: &HoldingHistoryEntry) -> Result<i64>;

    /// Inserts a new entry. Returns the assigned id.
    async fn insert(&self, entry: &HoldingHistoryEntry) -> Result<i64>;
}
