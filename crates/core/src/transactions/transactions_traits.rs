use async_trait::async_trait;
use chrono::NaiveDate;

use super::AssetTransaction;
use crate::errors::Result;

/// Read access to the transaction store.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn get_by_holding(&self, holding_id: i64) -> Result<Vec<AssetTransaction>>;

    /// Transactions dated within `[start_date, end_date]`, both inclusive.
    async fn get_by_holding_and_date_range(
        &self,
        holding_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AssetTransaction>>;
}
