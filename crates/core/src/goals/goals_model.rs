//! Goals domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::months::Month;

/// Domain model representing a savings goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialGoal {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub target_value: Decimal,
    pub start_date: NaiveDate,
}

impl FinancialGoal {
    pub fn start_month(&self) -> Month {
        Month::from_date(self.start_date)
    }
}

/// Contribution and return assumptions used to project a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalInvestmentPlan {
    pub goal_id: i64,
    pub monthly_contribution: Decimal,
    /// Percent per month (0.8 means 0.8%).
    pub monthly_return_rate: Decimal,
    pub initial_value: Decimal,
}

/// Consolidated figures for a goal's holdings in one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalMonthlyHistory {
    pub goal_id: i64,
    pub month: Month,
    /// Number of holdings that had a snapshot this month.
    pub holding_count: usize,
    pub value: Decimal,
    pub previous_value: Decimal,
    pub contributions: Decimal,
    pub withdrawals: Decimal,
    pub appreciation: Decimal,
    pub appreciation_percentage: Decimal,
    pub growth: Decimal,
    pub growth_percentage: Decimal,
}

/// One month of a goal projection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProjectionEntry {
    pub month: Month,
    pub projected_value: Decimal,
}

/// Historical and projected values of a goal on a single month axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalTimelinePoint {
    pub month: Month,
    pub actual_value: Option<Decimal>,
    pub projected_value: Option<Decimal>,
}
