//! Forward projection of a goal under its investment plan.

use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::{Arc, RwLock};

use super::goals_model::{FinancialGoal, GoalInvestmentPlan, GoalProjectionEntry};
use super::goals_traits::{GoalPlanRepositoryTrait, GoalRepositoryTrait};
use crate::constants::{MONEY_DECIMAL_PRECISION, PERCENT_SCALE};
use crate::errors::{CalculatorError, Error, Result, ValidationError};
use crate::months::Month;
use crate::settings::Settings;

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

/// Projects a goal month by month, starting at `start`.
///
/// Each month adds the plan's contribution and then applies the monthly
/// return, rounding to cents. The projection stops at the first month whose
/// value reaches the target, or after `max_months` entries.
pub fn project_goal(
    goal: &FinancialGoal,
    plan: &GoalInvestmentPlan,
    start: Month,
    max_months: u32,
) -> Result<Vec<GoalProjectionEntry>> {
    if max_months < 1 {
        return Err(ValidationError::InvalidMaxMonths(max_months).into());
    }
    if plan.monthly_contribution.is_zero()
        && plan.monthly_return_rate.is_zero()
        && plan.initial_value < goal.target_value
    {
        return Err(ValidationError::UnreachableGoal { goal_id: goal.id }.into());
    }

    let overflow = |month| CalculatorError::ProjectionOverflow {
        goal_id: goal.id,
        month,
    };
    let growth_factor = (plan.monthly_return_rate / Decimal::from(PERCENT_SCALE))
        .checked_add(Decimal::ONE)
        .ok_or_else(|| overflow(start))?;
    let mut value = plan.initial_value;
    let mut month = start;
    let mut entries = Vec::new();

    for _ in 0..max_months {
        value = value
            .checked_add(plan.monthly_contribution)
            .and_then(|funded| funded.checked_mul(growth_factor))
            .map(round_money)
            .ok_or_else(|| overflow(month))?;
        entries.push(GoalProjectionEntry {
            month,
            projected_value: value,
        });
        if value >= goal.target_value {
            break;
        }
        month = month.next();
    }

    if value < goal.target_value {
        debug!(
            "Goal {} not reached within {} months (last projected value {})",
            goal.id, max_months, value
        );
    }
    Ok(entries)
}

#[async_trait]
pub trait GoalProjectionServiceTrait: Send + Sync {
    /// Projects a goal from its start month using the default horizon.
    async fn project(&self, goal_id: i64) -> Result<Vec<GoalProjectionEntry>>;

    /// Same as [`project`](Self::project) with an explicit horizon.
    async fn project_with_horizon(
        &self,
        goal_id: i64,
        max_months: u32,
    ) -> Result<Vec<GoalProjectionEntry>>;
}

pub struct GoalProjectionService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    plan_repository: Arc<dyn GoalPlanRepositoryTrait>,
    settings: Arc<RwLock<Settings>>,
}

impl GoalProjectionService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        plan_repository: Arc<dyn GoalPlanRepositoryTrait>,
        settings: Arc<RwLock<Settings>>,
    ) -> Self {
        Self {
            goal_repository,
            plan_repository,
            settings,
        }
    }

    fn default_horizon(&self) -> Result<u32> {
        self.settings
            .read()
            .map(|settings| settings.default_max_months)
            .map_err(|_| Error::Settings("settings lock poisoned".to_string()))
    }

    async fn load(&self, goal_id: i64) -> Result<(FinancialGoal, GoalInvestmentPlan)> {
        let goal = self
            .goal_repository
            .get_by_id(goal_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("goal {}", goal_id)))?;
        let plan = self
            .plan_repository
            .get_by_goal(goal_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("investment plan for goal {}", goal_id)))?;
        Ok((goal, plan))
    }
}

#[async_trait]
impl GoalProjectionServiceTrait for GoalProjectionService {
    async fn project(&self, goal_id: i64) -> Result<Vec<GoalProjectionEntry>> {
        let max_months = self.default_horizon()?;
        self.project_with_horizon(goal_id, max_months).await
    }

    async fn project_with_horizon(
        &self,
        goal_id: i64,
        max_months: u32,
    ) -> Result<Vec<GoalProjectionEntry>> {
        let (goal, plan) = self.load(goal_id).await?;
        project_goal(&goal, &plan, goal.start_month(), max_months).map_err(|e| {
            warn!("Projection of goal {} rejected: {}", goal_id, e);
            e
        })
    }
}
