//! Goals module - savings goals, their history and their projection.

mod goal_history_service;
mod goal_projection;
mod goal_timeline;
mod goals_model;
mod goals_traits;

pub use goal_history_service::{GoalHistoryService, GoalHistoryServiceTrait};
pub use goal_projection::{project_goal, GoalProjectionService, GoalProjectionServiceTrait};
pub use goal_timeline::stitch_goal_timeline;
pub use goals_model::{
    FinancialGoal, GoalInvestmentPlan, GoalMonthlyHistory, GoalProjectionEntry, GoalTimelinePoint,
};
pub use goals_traits::{GoalPlanRepositoryTrait, GoalRepositoryTrait};
