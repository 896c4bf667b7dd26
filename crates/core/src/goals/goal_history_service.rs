//! Per-goal monthly history, consolidated from the goal's holding snapshots.

use async_trait::async_trait;
use log::{debug, error, info};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use super::goals_model::{FinancialGoal, GoalMonthlyHistory};
use super::goals_traits::GoalRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};
use crate::holdings::{Holding, HoldingRepositoryTrait};
use crate::months::{build_month_range, Month};
use crate::portfolio::history::{
    CurrentMonthProvider, HoldingHistoryEntry, HoldingHistoryRepositoryTrait,
};
use crate::portfolio::performance::{percentage_or_zero, Appreciation, Growth, TransactionBalance};
use crate::settings::Settings;
use crate::transactions::{AssetTransaction, TransactionRepositoryTrait};
use crate::utils::time_utils;

#[async_trait]
pub trait GoalHistoryServiceTrait: Send + Sync {
    /// Monthly totals for the goal from its start month up to, but not
    /// including, the in-progress month.
    async fn get_goal_history(&self, goal_id: i64) -> Result<Vec<GoalMonthlyHistory>>;
}

pub struct GoalHistoryService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    holding_repository: Arc<dyn HoldingRepositoryTrait>,
    history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    settings: Arc<RwLock<Settings>>,
    current_month: CurrentMonthProvider,
}

/// Running sums for one month.
#[derive(Debug, Default)]
struct MonthTotals {
    holding_count: usize,
    value: Decimal,
    previous_value: Decimal,
    contributions: Decimal,
    withdrawals: Decimal,
    appreciation: Decimal,
    growth: Decimal,
}

impl MonthTotals {
    fn add(
        &mut self,
        previous: Option<&HoldingHistoryEntry>,
        current: &HoldingHistoryEntry,
        balance: &TransactionBalance,
    ) {
        self.holding_count += 1;
        self.value += current.end_of_month_value;
        self.previous_value += previous
            .map(|entry| entry.end_of_month_value)
            .unwrap_or_default();
        self.contributions += balance.contributions;
        self.withdrawals += balance.withdrawals;
        self.appreciation += Appreciation::between_entries_lenient(previous, current, balance).value;
        self.growth += Growth::between_entries(previous, current, balance).value;
    }

    fn into_history(self, goal_id: i64, month: Month) -> GoalMonthlyHistory {
        GoalMonthlyHistory {
            goal_id,
            month,
            holding_count: self.holding_count,
            value: self.value,
            previous_value: self.previous_value,
            contributions: self.contributions,
            withdrawals: self.withdrawals,
            appreciation: self.appreciation,
            appreciation_percentage: percentage_or_zero(
                self.appreciation,
                self.previous_value,
                self.contributions,
            ),
            growth: self.growth,
            growth_percentage: percentage_or_zero(
                self.growth,
                self.previous_value,
                self.contributions,
            ),
        }
    }
}

impl GoalHistoryService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        holding_repository: Arc<dyn HoldingRepositoryTrait>,
        history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        settings: Arc<RwLock<Settings>>,
    ) -> Self {
        Self {
            goal_repository,
            holding_repository,
            history_repository,
            transaction_repository,
            settings,
            current_month: Arc::new(time_utils::current_month),
        }
    }

    /// Overrides how the live month is determined.
    pub fn with_current_month_provider(mut self, provider: CurrentMonthProvider) -> Self {
        self.current_month = provider;
        self
    }

    fn window_cap(&self) -> Result<u32> {
        self.settings
            .read()
            .map(|settings| settings.history_window_max_months)
            .map_err(|_| Error::Settings("settings lock poisoned".to_string()))
    }

    async fn load_goal(&self, goal_id: i64) -> Result<FinancialGoal> {
        if goal_id <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "goal id must be positive, got {}",
                goal_id
            ))
            .into());
        }
        self.goal_repository
            .get_by_id(goal_id)
            .await
            .map_err(|e| e.with_goal_context(goal_id))?
            .ok_or_else(|| Error::NotFound(format!("goal {}", goal_id)))
    }

    /// Snapshots of the goal's holdings for a month, keyed by holding id.
    async fn entries_for_month(
        &self,
        month: Month,
        holding_ids: &HashSet<i64>,
    ) -> Result<HashMap<i64, HoldingHistoryEntry>> {
        let entries = self
            .history_repository
            .get_by_month(month)
            .await
            .map_err(|e| e.with_month_context(month))?;
        Ok(entries
            .into_iter()
            .filter(|entry| holding_ids.contains(&entry.holding_id()))
            .map(|entry| (entry.holding_id(), entry))
            .collect())
    }

    async fn transactions_by_holding(
        &self,
        goal_id: i64,
        holdings: &[Holding],
    ) -> Result<HashMap<i64, Vec<AssetTransaction>>> {
        let mut by_holding = HashMap::with_capacity(holdings.len());
        for holding in holdings {
            let transactions = self
                .transaction_repository
                .get_by_holding(holding.id)
                .await
                .map_err(|e| {
                    error!(
                        "Failed to load transactions of holding {} for goal {}: {}",
                        holding.id, goal_id, e
                    );
                    e.with_goal_context(goal_id)
                })?;
            by_holding.insert(holding.id, transactions);
        }
        Ok(by_holding)
    }
}

#[async_trait]
impl GoalHistoryServiceTrait for GoalHistoryService {
    async fn get_goal_history(&self, goal_id: i64) -> Result<Vec<GoalMonthlyHistory>> {
        let goal = self.load_goal(goal_id).await?;
        let window_cap = self.window_cap()?;

        let start = goal.start_month();
        let end = (self.current_month)().previous();
        if start > end {
            debug!("Goal {} starts in {}; no closed months yet", goal.id, start);
            return Ok(Vec::new());
        }
        let months = build_month_range(start, end, window_cap)?;

        let holdings = self
            .holding_repository
            .get_by_goal(goal.id)
            .await
            .map_err(|e| e.with_goal_context(goal.id))?;
        if holdings.is_empty() {
            debug!("Goal {} has no holdings", goal.id);
        }
        let holding_ids: HashSet<i64> = holdings.iter().map(|holding| holding.id).collect();
        let transactions = self.transactions_by_holding(goal.id, &holdings).await?;

        let mut history = Vec::with_capacity(months.len());
        let mut previous_entries = self
            .entries_for_month(start.previous(), &holding_ids)
            .await?;
        for month in months {
            let current_entries = self.entries_for_month(month, &holding_ids).await?;

            let mut totals = MonthTotals::default();
            for holding in &holdings {
                // Holdings without a snapshot this month are left out entirely.
                let Some(current) = current_entries.get(&holding.id) else {
                    continue;
                };
                let month_transactions: Vec<AssetTransaction> = transactions
                    .get(&holding.id)
                    .map(|all| {
                        all.iter()
                            .filter(|tx| month.contains(tx.date))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                let balance = TransactionBalance::calculate(&month_transactions);
                totals.add(previous_entries.get(&holding.id), current, &balance);
            }

            history.push(totals.into_history(goal.id, month));
            previous_entries = current_entries;
        }

        info!(
            "Consolidated {} months of history for goal {} across {} holdings",
            history.len(),
            goal.id,
            holdings.len()
        );
        Ok(history)
    }
}
