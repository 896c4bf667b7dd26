use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Purchase,
    Sale,
}

/// A purchase or sale recorded against a holding. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransaction {
    pub id: Option<i64>,
    pub holding_id: i64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
    pub total_value: Decimal,
    /// Variable income only.
    pub quantity: Option<Decimal>,
    /// Variable income only.
    pub unit_price: Option<Decimal>,
}

impl AssetTransaction {
    /// A fixed income or fund transaction, recorded by total value only.
    pub fn new(
        holding_id: i64,
        transaction_type: TransactionType,
        date: NaiveDate,
        total_value: Decimal,
    ) -> Self {
        Self {
            id: None,
            holding_id,
            transaction_type,
            date,
            total_value,
            quantity: None,
            unit_price: None,
        }
    }

    /// A variable income transaction; `total_value = quantity * unit_price`.
    pub fn variable_income(
        holding_id: i64,
        transaction_type: TransactionType,
        date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: None,
            holding_id,
            transaction_type,
            date,
            total_value: quantity * unit_price,
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }
}
