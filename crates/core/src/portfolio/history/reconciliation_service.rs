//! Monthly snapshot reconciliation.
//!
//! Makes sure every holding has exactly one end-of-month entry for a month,
//! creating missing entries through the holding's [`SnapshotStrategy`] or, when
//! nothing applies, an explicit zero placeholder. Existing entries are never
//! rewritten by the batch path, which makes re-running a month a no-op.

use async_trait::async_trait;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{
    HoldingHistoryEntry, HoldingHistoryRepositoryTrait, ReconciledHolding, ReconciliationMode,
    SnapshotContext, SnapshotStrategy,
};
use crate::errors::{Error, Result};
use crate::holdings::Holding;
use crate::months::Month;
use crate::quotes::QuoteServiceTrait;
use crate::settings::Settings;
use crate::utils::time_utils;

/// Supplies the live, in-progress month.
pub type CurrentMonthProvider = Arc<dyn Fn() -> Month + Send + Sync>;

#[async_trait]
pub trait ReconciliationServiceTrait: Send + Sync {
    /// Returns the holding's entry for `month`, creating and persisting it
    /// when needed.
    async fn create_or_get_snapshot(
        &self,
        month: Month,
        holding: &Holding,
    ) -> Result<HoldingHistoryEntry>;

    /// Fills every gap in `month` for the given holdings.
    ///
    /// Returns one row per holding, in input order, with both the current and
    /// the previous month's entries.
    async fn reconcile_month(
        &self,
        month: Month,
        holdings: &[Holding],
    ) -> Result<Vec<ReconciledHolding>>;
}

/// How a missing entry gets filled.
#[derive(Debug)]
enum GapFill {
    /// A strategy produced the entry.
    Created(HoldingHistoryEntry),
    /// Nothing applied; persist a zero placeholder.
    Placeholder,
    /// Deliberately left open; an unpersisted placeholder stands in.
    Deferred,
}

#[derive(Debug, Default)]
struct MonthPair {
    current: Option<HoldingHistoryEntry>,
    previous: Option<HoldingHistoryEntry>,
}

pub struct ReconciliationService {
    history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
    quote_service: Arc<dyn QuoteServiceTrait>,
    settings: Arc<RwLock<Settings>>,
    current_month: CurrentMonthProvider,
}

impl ReconciliationService {
    pub fn new(
        history_repository: Arc<dyn HoldingHistoryRepositoryTrait>,
        quote_service: Arc<dyn QuoteServiceTrait>,
        settings: Arc<RwLock<Settings>>,
    ) -> Self {
        Self {
            history_repository,
            quote_service,
            settings,
            current_month: Arc::new(time_utils::current_month),
        }
    }

    /// Overrides how the live month is determined.
    pub fn with_current_month_provider(mut self, provider: CurrentMonthProvider) -> Self {
        self.current_month = provider;
        self
    }

    fn settings(&self) -> Result<Settings> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| Error::Settings("settings lock poisoned".to_string()))
    }

    /// Decides how the gap for `context.month` is filled. Never writes.
    async fn resolve_gap(
        &self,
        context: SnapshotContext<'_>,
        mode: ReconciliationMode,
        settings: &Settings,
    ) -> Result<GapFill> {
        let holding = context.holding;

        if settings.is_before_history(context.month) {
            debug!(
                "{} predates history tracking; placeholder for holding {}",
                context.month, holding.id
            );
            return Ok(GapFill::Placeholder);
        }

        if mode == ReconciliationMode::Batch
            && holding.is_variable_income()
            && context.month != (self.current_month)()
        {
            debug!(
                "Skipping variable income holding {} for past month {}",
                holding.id, context.month
            );
            return Ok(GapFill::Deferred);
        }

        let Some(strategy) = SnapshotStrategy::for_holding(holding) else {
            return Ok(GapFill::Placeholder);
        };

        let created = strategy
            .create_entry(context, self.quote_service.as_ref(), settings)
            .await?;
        Ok(match created {
            Some(entry) => GapFill::Created(entry),
            None => GapFill::Placeholder,
        })
    }

    /// Persists an entry and returns it with its assigned id.
    ///
    /// Creation upserts so an existing (holding, month) row is replaced
    /// rather than duplicated; batch only ever writes true gaps and inserts.
    async fn persist(
        &self,
        entry: HoldingHistoryEntry,
        mode: ReconciliationMode,
    ) -> Result<HoldingHistoryEntry> {
        let id = match mode {
            ReconciliationMode::Creation => self.history_repository.upsert(&entry).await?,
            ReconciliationMode::Batch => self.history_repository.insert(&entry).await?,
        };
        Ok(entry.with_id(id))
    }

    async fn fill_gap(
        &self,
        context: SnapshotContext<'_>,
        mode: ReconciliationMode,
        settings: &Settings,
    ) -> Result<HoldingHistoryEntry> {
        let placeholder = || HoldingHistoryEntry::placeholder(context.holding, context.month);
        match self.resolve_gap(context, mode, settings).await? {
            GapFill::Created(entry) => self.persist(entry, mode).await,
            GapFill::Placeholder => self.persist(placeholder(), mode).await,
            GapFill::Deferred => Ok(placeholder()),
        }
    }

    async fn create_or_get_inner(
        &self,
        month: Month,
        holding: &Holding,
        settings: &Settings,
    ) -> Result<HoldingHistoryEntry> {
        let (current, previous) = if settings.is_before_history(month) {
            (None, None)
        } else {
            let current = self
                .history_repository
                .get_by_holding_and_month(holding, month)
                .await?;
            let previous = self
                .history_repository
                .get_by_holding_and_month(holding, month.previous())
                .await?;
            (current, previous)
        };

        let context = SnapshotContext {
            holding,
            month,
            previous: previous.as_ref(),
            current: current.as_ref(),
        };
        self.fill_gap(context, ReconciliationMode::Creation, settings)
            .await
    }

    async fn load_month_pairs(&self, month: Month) -> Result<HashMap<i64, MonthPair>> {
        let current_entries = self
            .history_repository
            .get_by_month(month)
            .await
            .map_err(|e| e.with_month_context(month))?;
        let previous_month = month.previous();
        let previous_entries = self
            .history_repository
            .get_by_month(previous_month)
            .await
            .map_err(|e| e.with_month_context(previous_month))?;

        let mut pairs: HashMap<i64, MonthPair> = HashMap::new();
        for entry in current_entries {
            let holding_id = entry.holding_id();
            pairs.entry(holding_id).or_default().current = Some(entry);
        }
        for entry in previous_entries {
            let holding_id = entry.holding_id();
            pairs.entry(holding_id).or_default().previous = Some(entry);
        }
        Ok(pairs)
    }
}

#[async_trait]
impl ReconciliationServiceTrait for ReconciliationService {
    async fn create_or_get_snapshot(
        &self,
        month: Month,
        holding: &Holding,
    ) -> Result<HoldingHistoryEntry> {
        holding.validate_id()?;
        let settings = self.settings()?;

        self.create_or_get_inner(month, holding, &settings)
            .await
            .map_err(|e| {
                error!(
                    "Snapshot creation failed for holding {} in {}: {}",
                    holding.id, month, e
                );
                e.with_holding_context(holding.id, month)
            })
    }

    async fn reconcile_month(
        &self,
        month: Month,
        holdings: &[Holding],
    ) -> Result<Vec<ReconciledHolding>> {
        for holding in holdings {
            holding.validate_id()?;
        }
        let settings = self.settings()?;

        // Both reads complete before any gap is filled.
        let mut pairs = self.load_month_pairs(month).await?;

        let mut reconciled = Vec::with_capacity(holdings.len());
        let mut filled = 0usize;
        for holding in holdings {
            let pair = pairs.entry(holding.id).or_default();

            let current_entry = match pair.current.clone() {
                Some(existing) => existing,
                None => {
                    let context = SnapshotContext {
                        holding,
                        month,
                        previous: pair.previous.as_ref(),
                        current: None,
                    };
                    let entry = self
                        .fill_gap(context, ReconciliationMode::Batch, &settings)
                        .await
                        .map_err(|e| {
                            error!(
                                "Reconciliation of {} aborted at holding {}: {}",
                                month, holding.id, e
                            );
                            e.with_holding_context(holding.id, month)
                        })?;
                    if entry.is_persisted() {
                        filled += 1;
                        pair.current = Some(entry.clone());
                    }
                    entry
                }
            };

            let previous_entry = pair
                .previous
                .clone()
                .unwrap_or_else(|| HoldingHistoryEntry::placeholder(holding, month.previous()));

            reconciled.push(ReconciledHolding {
                holding: holding.clone(),
                current_entry,
                previous_entry,
            });
        }

        info!(
            "Reconciled {} holdings for {} ({} gaps filled)",
            reconciled.len(),
            month,
            filled
        );
        Ok(reconciled)
    }
}
