//! Hand-written store mocks and fixtures shared by the unit tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{
    FinancialGoal, GoalInvestmentPlan, GoalPlanRepositoryTrait, GoalRepositoryTrait,
};
use crate::holdings::{Asset, AssetType, Brokerage, Holding, HoldingRepositoryTrait};
use crate::months::Month;
use crate::portfolio::history::{HoldingHistoryEntry, HoldingHistoryRepositoryTrait};
use crate::quotes::{MonthlyQuote, QuoteServiceTrait};
use crate::transactions::{AssetTransaction, TransactionRepositoryTrait};

pub fn month(year: i32, month: u32) -> Month {
    Month::new(year, month).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn holding(id: i64, asset_type: AssetType, ticker: Option<&str>) -> Holding {
    Holding {
        id,
        asset: Asset {
            id: id * 100,
            name: format!("Asset {}", id),
            asset_type,
            ticker: ticker.map(str::to_string),
        },
        owner_id: 1,
        brokerage: Brokerage {
            id: 1,
            name: "Broker".to_string(),
        },
        goal_id: None,
    }
}

pub fn fixed_income_holding(id: i64) -> Holding {
    holding(id, AssetType::FixedIncome, None)
}

pub fn fund_holding(id: i64) -> Holding {
    holding(id, AssetType::InvestmentFund, None)
}

pub fn variable_income_holding(id: i64, ticker: &str) -> Holding {
    holding(id, AssetType::VariableIncome, Some(ticker))
}

pub fn history_entry(holding: &Holding, month: Month, value: Decimal) -> HoldingHistoryEntry {
    HoldingHistoryEntry {
        id: None,
        holding: holding.clone(),
        reference_month: month,
        end_of_month_value: value,
        end_of_month_quantity: Decimal::ONE,
        end_of_month_average_cost: value,
        total_invested: value,
    }
}

// =============================================================================
// Holding history
// =============================================================================

#[derive(Default)]
pub struct MockHistoryRepository {
    entries: RwLock<Vec<HoldingHistoryEntry>>,
    next_id: AtomicUsize,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_reads: RwLock<bool>,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            ..Default::default()
        }
    }

    /// Seeds an entry directly, bypassing the write counter.
    pub fn seed(&self, entry: HoldingHistoryEntry) -> HoldingHistoryEntry {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        let stored = entry.with_id(id);
        self.entries.write().unwrap().push(stored.clone());
        stored
    }

    pub fn all(&self) -> Vec<HoldingHistoryEntry> {
        self.entries.read().unwrap().clone()
    }

    pub fn entries_for(&self, holding_id: i64, month: Month) -> Vec<HoldingHistoryEntry> {
        self.all()
            .into_iter()
            .filter(|e| e.holding_id() == holding_id && e.reference_month == month)
            .collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.write().unwrap() = true;
    }

    fn check_reads(&self) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if *self.fail_reads.read().unwrap() {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "history store offline".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl HoldingHistoryRepositoryTrait for MockHistoryRepository {
    async fn get_by_month(&self, month: Month) -> Result<Vec<HoldingHistoryEntry>> {
        self.check_reads()?;
        Ok(self
            .all()
            .into_iter()
            .filter(|e| e.reference_month == month)
            .collect())
    }

    async fn get_by_holding_and_month(
        &self,
        holding: &Holding,
        month: Month,
    ) -> Result<Option<HoldingHistoryEntry>> {
        self.check_reads()?;
        Ok(self.entries_for(holding.id, month).into_iter().next())
    }

    async fn upsert(&self, entry: &HoldingHistoryEntry) -> Result<i64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.write().unwrap();
        if let Some(existing) = entries.iter_mut().find(|e| {
            e.holding_id() == entry.holding_id() && e.reference_month == entry.reference_month
        }) {
            let id = existing.id.unwrap_or_default();
            *existing = entry.clone().with_id(id);
            return Ok(id);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        entries.push(entry.clone().with_id(id));
        Ok(id)
    }

    async fn insert(&self, entry: &HoldingHistoryEntry) -> Result<i64> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64;
        self.entries
            .write()
            .unwrap()
            .push(entry.clone().with_id(id));
        Ok(id)
    }
}

// =============================================================================
// Quotes
// =============================================================================

#[derive(Default)]
pub struct MockQuoteService {
    quotes: RwLock<HashMap<(String, Month), MonthlyQuote>>,
    calls: AtomicUsize,
}

impl MockQuoteService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_quote(&self, ticker: &str, month: Month, quote: MonthlyQuote) {
        self.quotes
            .write()
            .unwrap()
            .insert((ticker.to_string(), month), quote);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteServiceTrait for MockQuoteService {
    async fn get_quote(&self, ticker: &str, month: Month) -> Result<MonthlyQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.quotes
            .read()
            .unwrap()
            .get(&(ticker.to_string(), month))
            .cloned()
            .ok_or_else(|| Error::Quote(format!("no quote for {} in {}", ticker, month)))
    }
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Default)]
pub struct MockTransactionRepository {
    transactions: RwLock<Vec<AssetTransaction>>,
    fail_reads: RwLock<bool>,
}

impl MockTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, transaction: AssetTransaction) {
        self.transactions.write().unwrap().push(transaction);
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.write().unwrap() = true;
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MockTransactionRepository {
    async fn get_by_holding(&self, holding_id: i64) -> Result<Vec<AssetTransaction>> {
        if *self.fail_reads.read().unwrap() {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "transaction store offline".to_string(),
            )));
        }
        Ok(self
            .transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.holding_id == holding_id)
            .cloned()
            .collect())
    }

    async fn get_by_holding_and_date_range(
        &self,
        holding_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<AssetTransaction>> {
        Ok(self
            .get_by_holding(holding_id)
            .await?
            .into_iter()
            .filter(|t| t.date >= start_date && t.date <= end_date)
            .collect())
    }
}

// =============================================================================
// Holdings and goals
// =============================================================================

#[derive(Default)]
pub struct MockHoldingRepository {
    holdings: RwLock<Vec<Holding>>,
    fail_reads: bool,
}

impl MockHoldingRepository {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self {
            holdings: RwLock::new(holdings),
            fail_reads: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for MockHoldingRepository {
    async fn get_all(&self) -> Result<Vec<Holding>> {
        if self.fail_reads {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "holding store offline".to_string(),
            )));
        }
        Ok(self.holdings.read().unwrap().clone())
    }

    async fn get_by_goal(&self, goal_id: i64) -> Result<Vec<Holding>> {
        Ok(self
            .get_all()
            .await?
            .into_iter()
            .filter(|h| h.goal_id == Some(goal_id))
            .collect())
    }
}

#[derive(Default)]
pub struct MockGoalRepository {
    goals: RwLock<Vec<FinancialGoal>>,
    plans: RwLock<Vec<GoalInvestmentPlan>>,
}

impl MockGoalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_goal(&self, goal: FinancialGoal) {
        self.goals.write().unwrap().push(goal);
    }

    pub fn add_plan(&self, plan: GoalInvestmentPlan) {
        self.plans.write().unwrap().push(plan);
    }
}

#[async_trait]
impl GoalRepositoryTrait for MockGoalRepository {
    async fn get_by_id(&self, goal_id: i64) -> Result<Option<FinancialGoal>> {
        Ok(self
            .goals
            .read()
            .unwrap()
            .iter()
            .find(|g| g.id == goal_id)
            .cloned())
    }
}

#[async_trait]
impl GoalPlanRepositoryTrait for MockGoalRepository {
    async fn get_by_goal(&self, goal_id: i64) -> Result<Option<GoalInvestmentPlan>> {
        Ok(self
            .plans
            .read()
            .unwrap()
            .iter()
            .find(|p| p.goal_id == goal_id)
            .cloned())
    }
}
