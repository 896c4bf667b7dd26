//! Holding domain models.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Asset classes tracked by the engine. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    /// Bonds, CDs and other instruments valued manually.
    FixedIncome,
    /// Investment funds, valued manually.
    InvestmentFund,
    /// Listed stocks, REITs and ETFs priced from quotes.
    VariableIncome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub name: String,
    pub asset_type: AssetType,
    /// Exchange ticker; required for variable income assets.
    pub ticker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brokerage {
    pub id: i64,
    pub name: String,
}

/// A tracked position: an asset held by an owner at a brokerage.
///
/// Holdings are values. Changing an attribute produces a new `Holding`
/// with the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: i64,
    pub asset: Asset,
    pub owner_id: i64,
    pub brokerage: Brokerage,
    pub goal_id: Option<i64>,
}

impl Holding {
    pub fn asset_type(&self) -> AssetType {
        self.asset.asset_type
    }

    pub fn is_variable_income(&self) -> bool {
        self.asset_type() == AssetType::VariableIncome
    }

    pub fn with_goal(&self, goal_id: Option<i64>) -> Self {
        Self {
            goal_id,
            ..self.clone()
        }
    }

    /// Rejects ids that cannot belong to a persisted holding.
    pub fn validate_id(&self) -> Result<()> {
        if self.id <= 0 {
            return Err(ValidationError::InvalidHoldingId(self.id).into());
        }
        Ok(())
    }

    /// The ticker used for quote lookups.
    pub fn ticker(&self) -> Result<&str> {
        self.asset
            .ticker
            .as_deref()
            .filter(|ticker| !ticker.trim().is_empty())
            .ok_or_else(|| ValidationError::MissingTicker(self.id).into())
    }
}
