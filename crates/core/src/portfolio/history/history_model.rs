//! Holding history domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;
use crate::months::Month;
use crate::portfolio::performance::{Appreciation, Growth, TransactionBalance};

/// End-of-month state of a holding.
///
/// There is at most one entry per (holding, month). `id` stays `None` until
/// the entry has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingHistoryEntry {
    pub id: Option<i64>,
    pub holding: Holding,
    pub reference_month: Month,
    pub end_of_month_value: Decimal,
    pub end_of_month_quantity: Decimal,
    pub end_of_month_average_cost: Decimal,
    pub total_invested: Decimal,
}

impl HoldingHistoryEntry {
    /// The explicit zero-valued entry used when nothing better applies.
    pub fn placeholder(holding: &Holding, month: Month) -> Self {
        Self {
            id: None,
            holding: holding.clone(),
            reference_month: month,
            end_of_month_value: Decimal::ZERO,
            end_of_month_quantity: Decimal::ONE,
            end_of_month_average_cost: Decimal::ZERO,
            total_invested: Decimal::ZERO,
        }
    }

    /// Copies this entry's values into an unpersisted entry for `month`.
    pub fn carried_to(&self, month: Month) -> Self {
        Self {
            id: None,
            reference_month: month,
            ..self.clone()
        }
    }

    pub fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn holding_id(&self) -> i64 {
        self.holding.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Whether a reconciliation pass creates a single snapshot on demand or
/// fills the gaps of a whole month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReconciliationMode {
    /// On-demand creation for one holding. Always falls back to a persisted
    /// placeholder and re-prices variable income for any month.
    Creation,
    /// Whole-month gap filling. Variable income is only priced for the live
    /// current month.
    Batch,
}

/// One row of a reconciled month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledHolding {
    pub holding: Holding,
    pub current_entry: HoldingHistoryEntry,
    pub previous_entry: HoldingHistoryEntry,
}

/// Per-holding performance for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingMonthlyPerformance {
    pub holding: Holding,
    pub month: Month,
    pub previous_value: Decimal,
    pub current_value: Decimal,
    pub balance: TransactionBalance,
    pub appreciation: Appreciation,
    pub growth: Growth,
}
