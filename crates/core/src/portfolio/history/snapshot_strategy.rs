//! Per-asset-class policies for producing a month's snapshot.

use log::debug;
use rust_decimal::Decimal;

use super::HoldingHistoryEntry;
use crate::errors::Result;
use crate::holdings::{AssetType, Holding};
use crate::months::Month;
use crate::quotes::{resolve_quote_price, QuoteServiceTrait};
use crate::settings::Settings;

/// Inputs a strategy may use to build the entry for `month`.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotContext<'a> {
    pub holding: &'a Holding,
    pub month: Month,
    /// The entry for `month - 1`, if any.
    pub previous: Option<&'a HoldingHistoryEntry>,
    /// The entry already stored for `month`, if any.
    pub current: Option<&'a HoldingHistoryEntry>,
}

/// Snapshot creation strategy. One variant per asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotStrategy {
    /// Copy-forward of the previous month's entry.
    FixedIncome,
    /// Copy-forward of the previous month's entry.
    Fund,
    /// Re-priced from the month's quote.
    VariableIncome,
}

impl SnapshotStrategy {
    /// Registered strategies, in dispatch order.
    pub const ALL: [SnapshotStrategy; 3] = [
        SnapshotStrategy::FixedIncome,
        SnapshotStrategy::Fund,
        SnapshotStrategy::VariableIncome,
    ];

    pub fn can_handle(&self, holding: &Holding) -> bool {
        matches!(
            (self, holding.asset_type()),
            (SnapshotStrategy::FixedIncome, AssetType::FixedIncome)
                | (SnapshotStrategy::Fund, AssetType::InvestmentFund)
                | (SnapshotStrategy::VariableIncome, AssetType::VariableIncome)
        )
    }

    /// First registered strategy that handles the holding.
    pub fn for_holding(holding: &Holding) -> Option<SnapshotStrategy> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.can_handle(holding))
    }

    /// Builds the entry for `context.month`.
    ///
    /// `Ok(None)` means the strategy has nothing to go on and the caller
    /// should fall back to a placeholder. Errors must not be replaced by one.
    pub async fn create_entry(
        &self,
        context: SnapshotContext<'_>,
        quote_service: &dyn QuoteServiceTrait,
        settings: &Settings,
    ) -> Result<Option<HoldingHistoryEntry>> {
        match self {
            SnapshotStrategy::FixedIncome | SnapshotStrategy::Fund => Ok(copy_forward(context)),
            SnapshotStrategy::VariableIncome => {
                price_from_quote(context, quote_service, settings).await
            }
        }
    }
}

/// Manually valued instruments keep last month's figures until a user edits them.
fn copy_forward(context: SnapshotContext<'_>) -> Option<HoldingHistoryEntry> {
    if let Some(current) = context.current {
        return Some(current.clone());
    }
    let previous = context.previous?;
    debug!(
        "Copying holding {} forward from {} to {}",
        context.holding.id, previous.reference_month, context.month
    );
    Some(previous.carried_to(context.month))
}

async fn price_from_quote(
    context: SnapshotContext<'_>,
    quote_service: &dyn QuoteServiceTrait,
    settings: &Settings,
) -> Result<Option<HoldingHistoryEntry>> {
    let base = match (context.current, context.previous) {
        (Some(current), _) => current.clone(),
        (None, Some(previous)) => previous.carried_to(context.month),
        (None, None) => {
            debug!(
                "No previous entry for holding {} before {}; nothing to price",
                context.holding.id, context.month
            );
            return Ok(None);
        }
    };

    let ticker = context.holding.ticker()?;
    let quote = quote_service.get_quote(ticker, context.month).await?;
    let price = resolve_quote_price(&quote, ticker, context.month)?;

    let end_of_month_value = position_value(price, base.end_of_month_quantity, settings);
    debug!(
        "Priced holding {} ({}) for {} at {}",
        context.holding.id, ticker, context.month, end_of_month_value
    );

    Ok(Some(HoldingHistoryEntry {
        holding: context.holding.clone(),
        end_of_month_value,
        ..base
    }))
}

fn position_value(price: Decimal, quantity: Decimal, settings: &Settings) -> Decimal {
    if settings.value_variable_income_by_quantity {
        price * quantity
    } else {
        price
    }
}
