use async_trait::async_trait;

use super::Holding;
use crate::errors::Result;

/// Read access to the holding store.
#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Holding>>;

    /// Holdings linked to the given goal.
    async fn get_by_goal(&self, goal_id: i64) -> Result<Vec<Holding>>;
}
