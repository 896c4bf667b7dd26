//! Pure calculation rules over monthly values and cash flows.
//!
//! Every percentage is computed against an *effective base*: the previous
//! value when positive, otherwise the period's contributions when positive.
//! When neither exists the strict appreciation rule fails, while the lenient
//! appreciation and the growth rule report 0%.

use num_traits::Zero;
use rust_decimal::Decimal;

use super::{Appreciation, Growth, TransactionBalance};
use crate::constants::PERCENT_SCALE;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::history::HoldingHistoryEntry;
use crate::transactions::{AssetTransaction, TransactionType};

/// Denominator for percentage calculations, if one exists.
pub fn effective_base(previous_value: Decimal, contributions: Decimal) -> Option<Decimal> {
    if previous_value > Decimal::zero() {
        Some(previous_value)
    } else if contributions > Decimal::zero() {
        Some(contributions)
    } else {
        None
    }
}

fn percentage_of(value: Decimal, base: Decimal) -> Decimal {
    value / base * Decimal::from(PERCENT_SCALE)
}

/// `value` as a percentage of the effective base, or 0 when there is none.
pub fn percentage_or_zero(
    value: Decimal,
    previous_value: Decimal,
    contributions: Decimal,
) -> Decimal {
    effective_base(previous_value, contributions)
        .map(|base| percentage_of(value, base))
        .unwrap_or(Decimal::ZERO)
}

fn previous_value_of(previous: Option<&HoldingHistoryEntry>) -> Decimal {
    previous
        .map(|entry| entry.end_of_month_value)
        .unwrap_or(Decimal::ZERO)
}

impl TransactionBalance {
    pub fn calculate(transactions: &[AssetTransaction]) -> Self {
        let (contributions, withdrawals) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(contributions, withdrawals), tx| match tx.transaction_type {
                TransactionType::Purchase => (contributions + tx.total_value, withdrawals),
                TransactionType::Sale => (contributions, withdrawals + tx.total_value),
            },
        );
        Self {
            contributions,
            withdrawals,
            balance: contributions - withdrawals,
        }
    }
}

impl Appreciation {
    fn value_of(
        previous_value: Decimal,
        current_value: Decimal,
        contributions: Decimal,
        withdrawals: Decimal,
    ) -> Decimal {
        (current_value - previous_value) - contributions + withdrawals
    }

    /// Strict variant for point calculations.
    ///
    /// Fails with [`CalculatorError::NoEffectiveBase`] when there is neither a
    /// positive previous value nor positive contributions.
    pub fn calculate(
        previous_value: Decimal,
        current_value: Decimal,
        contributions: Decimal,
        withdrawals: Decimal,
    ) -> Result<Self> {
        let value = Self::value_of(previous_value, current_value, contributions, withdrawals);
        let base = effective_base(previous_value, contributions)
            .ok_or(CalculatorError::NoEffectiveBase)?;
        Ok(Self {
            value,
            percentage: percentage_of(value, base),
        })
    }

    /// Lenient variant used by monthly aggregation: 0% instead of failing.
    pub fn calculate_lenient(
        previous_value: Decimal,
        current_value: Decimal,
        contributions: Decimal,
        withdrawals: Decimal,
    ) -> Self {
        let value = Self::value_of(previous_value, current_value, contributions, withdrawals);
        Self {
            value,
            percentage: percentage_or_zero(value, previous_value, contributions),
        }
    }

    /// Strict appreciation between two monthly snapshots.
    ///
    /// A missing previous entry counts as a previous value of zero.
    pub fn between_entries(
        previous: Option<&HoldingHistoryEntry>,
        current: &HoldingHistoryEntry,
        balance: &TransactionBalance,
    ) -> Result<Self> {
        Self::calculate(
            previous_value_of(previous),
            current.end_of_month_value,
            balance.contributions,
            balance.withdrawals,
        )
    }

    /// Lenient appreciation between two monthly snapshots.
    pub fn between_entries_lenient(
        previous: Option<&HoldingHistoryEntry>,
        current: &HoldingHistoryEntry,
        balance: &TransactionBalance,
    ) -> Self {
        Self::calculate_lenient(
            previous_value_of(previous),
            current.end_of_month_value,
            balance.contributions,
            balance.withdrawals,
        )
    }
}

impl Growth {
    /// Growth never fails: without an effective base the percentage is 0.
    pub fn calculate(
        previous_value: Decimal,
        current_value: Decimal,
        contributions: Decimal,
        withdrawals: Decimal,
    ) -> Self {
        let appreciation = Appreciation::calculate_lenient(
            previous_value,
            current_value,
            contributions,
            withdrawals,
        );
        let value = appreciation.value + contributions - withdrawals;
        Self {
            value,
            percentage: percentage_or_zero(value, previous_value, contributions),
        }
    }

    pub fn between_entries(
        previous: Option<&HoldingHistoryEntry>,
        current: &HoldingHistoryEntry,
        balance: &TransactionBalance,
    ) -> Self {
        Self::calculate(
            previous_value_of(previous),
            current.end_of_month_value,
            balance.contributions,
            balance.withdrawals,
        )
    }
}
