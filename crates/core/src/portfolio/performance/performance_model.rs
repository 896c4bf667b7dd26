use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cash flow totals for a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBalance {
    /// Sum of purchase values.
    pub contributions: Decimal,
    /// Sum of sale values.
    pub withdrawals: Decimal,
    /// `contributions - withdrawals`
    pub balance: Decimal,
}

/// Price-driven gain or loss, with cash flow removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appreciation {
    pub value: Decimal,
    /// Expressed x100 (10 means 10%).
    pub percentage: Decimal,
}

/// Total change in position value, appreciation plus net cash flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub value: Decimal,
    /// Expressed x100 (10 means 10%).
    pub percentage: Decimal,
}
