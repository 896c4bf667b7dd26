use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::{
    HoldingHistoryEntry, HoldingHistoryRepositoryTrait, HoldingMonthlyPerformance,
    ReconciliationServiceTrait,
};
use crate::errors::{Error, Result};
use crate::holdings::Holding;
use crate::months::Month;
use crate::portfolio::performance::{Appreciation, Growth, TransactionBalance};
use crate::transactions::TransactionRepositoryTrait;

#[async_trait]
pub trait HoldingPerformanceServiceTrait: Send + Sync {
    /// Reconciles `month` and reports appreciation and growth for every holding.
    ///
    /// Uses the lenient appreciation rule: holdings without an effective base
    /// report 0% instead of failing the whole month. Holdings the month was
    /// reconciled without (past-month variable income) are left out.
    async fn get_month_performance(
        &self,
        month: Month,
        holdings: &[Holding],
    ) -> Result<Vec<HoldingMonthlyPerformance>>;

    /// Point calculation for one holding, with the strict appreciation rule.
    async fn get_holding_performance(
        &self,
        month: Month,
        holding: &Holding,
    ) -> Result<HoldingMonthlyPerformance>;
}

pub struct HoldingPerformanceService {
    reconciliation_service: Arc<dyn ReconciliationServiceTrait>,
    history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl HoldingPerformanceService {
    pub fn new(
        reconciliation_service: Arc<dyn ReconciliationServiceTrait>,
        history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            reconciliation_service,
            history_repository,
            transaction_repository,
        }
    }

    async fn month_balance(&self, holding: &Holding, month: Month) -> Result<TransactionBalance> {
        let transactions = self
            .transaction_repository
            .get_by_holding_and_date_range(holding.id, month.first_day(), month.last_day())
            .await?;
        Ok(TransactionBalance::calculate(&transactions))
    }
}

fn performance_row(
    holding: &Holding,
    month: Month,
    previous: Option<&HoldingHistoryEntry>,
    current: &HoldingHistoryEntry,
    balance: TransactionBalance,
    appreciation: Appreciation,
) -> HoldingMonthlyPerformance {
    HoldingMonthlyPerformance {
        holding: holding.clone(),
        month,
        previous_value: previous
            .map(|entry| entry.end_of_month_value)
            .unwrap_or_default(),
        current_value: current.end_of_month_value,
        growth: Growth::between_entries(previous, current, &balance),
        balance,
        appreciation,
    }
}

#[async_trait]
impl HoldingPerformanceServiceTrait for HoldingPerformanceService {
    async fn get_month_performance(
        &self,
        month: Month,
        holdings: &[Holding],
    ) -> Result<Vec<HoldingMonthlyPerformance>> {
        let reconciled = self
            .reconciliation_service
            .reconcile_month(month, holdings)
            .await?;

        let mut rows = Vec::with_capacity(reconciled.len());
        for row in &reconciled {
            // Deferred holdings have no data for the month, only a stand-in.
            if !row.current_entry.is_persisted() {
                debug!(
                    "No snapshot for holding {} in {}; left out of performance",
                    row.holding.id, month
                );
                continue;
            }
            let balance = self
                .month_balance(&row.holding, month)
                .await
                .map_err(|e| e.with_holding_context(row.holding.id, month))?;
            let appreciation = Appreciation::between_entries_lenient(
                Some(&row.previous_entry),
                &row.current_entry,
                &balance,
            );
            rows.push(performance_row(
                &row.holding,
                month,
                Some(&row.previous_entry),
                &row.current_entry,
                balance,
                appreciation,
            ));
        }
        debug!("Computed performance for {} holdings in {}", rows.len(), month);
        Ok(rows)
    }

    async fn get_holding_performance(
        &self,
        month: Month,
        holding: &Holding,
    ) -> Result<HoldingMonthlyPerformance> {
        let current = self
            .reconciliation_service
            .create_or_get_snapshot(month, holding)
            .await?;

        let context = |e: Error| e.with_holding_context(holding.id, month);
        let previous = self
            .history_repository
            .get_by_holding_and_month(holding, month.previous())
            .await
            .map_err(context)?;
        let balance = self.month_balance(holding, month).await.map_err(context)?;
        let appreciation = Appreciation::between_entries(previous.as_ref(), &current, &balance)
            .map_err(context)?;

        Ok(performance_row(
            holding,
            month,
            previous.as_ref(),
            &current,
            balance,
            appreciation,
        ))
    }
}
