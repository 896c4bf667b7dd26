use async_trait::async_trait;

use crate::errors::Result;
use crate::goals::goals_model::{FinancialGoal, GoalInvestmentPlan};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, goal_id: i64) -> Result<Option<FinancialGoal>>;
}

/// Trait for goal plan repository operations
#[async_trait]
pub trait GoalPlanRepositoryTrait: Send + Sync {
    /// The active plan of a goal. Goals have at most one.
    async fn get_by_goal(&self, goal_id: i64) -> Result<Option<GoalInvestmentPlan>>;
}
