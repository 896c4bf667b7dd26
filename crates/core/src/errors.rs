//! Core error types for the Investfolio engine.
//!
//! Storage and quote collaborators report failures through [`DatabaseError`] or
//! [`Error::Quote`]; the engine wraps them with the holding and month it was
//! working on before handing them back to the caller.

use thiserror::Error;

use crate::months::Month;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Quote lookup failed: {0}")]
    Quote(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("Failed to process holding {holding_id} for {month}: {source}")]
    HoldingContext {
        holding_id: i64,
        month: Month,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to process {month}: {source}")]
    MonthContext {
        month: Month,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to process goal {goal_id}: {source}")]
    GoalContext {
        goal_id: i64,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps an error with the holding and month being processed.
    ///
    /// Errors that already carry a context are returned unchanged so nested
    /// calls do not stack the same information twice.
    pub fn with_holding_context(self, holding_id: i64, month: Month) -> Self {
        if self.has_context() {
            return self;
        }
        Error::HoldingContext {
            holding_id,
            month,
            source: Box::new(self),
        }
    }

    /// Wraps an error raised by a month-wide operation.
    pub fn with_month_context(self, month: Month) -> Self {
        if self.has_context() {
            return self;
        }
        Error::MonthContext {
            month,
            source: Box::new(self),
        }
    }

    /// Wraps an error raised while loading data for a goal.
    pub fn with_goal_context(self, goal_id: i64) -> Self {
        if self.has_context() {
            return self;
        }
        Error::GoalContext {
            goal_id,
            source: Box::new(self),
        }
    }

    fn has_context(&self) -> bool {
        matches!(
            self,
            Error::HoldingContext { .. } | Error::MonthContext { .. } | Error::GoalContext { .. }
        )
    }

    /// Returns the innermost error, skipping context wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::HoldingContext { source, .. }
            | Error::MonthContext { source, .. }
            | Error::GoalContext { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// Store implementations convert their driver errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Errors raised mid-calculation when the data does not allow a result.
#[derive(Error, Debug, PartialEq)]
pub enum CalculatorError {
    #[error("No effective base for percentage: previous value and contributions are both zero")]
    NoEffectiveBase,

    #[error("Quote for {ticker} in {month} has neither close nor adjusted close")]
    MissingQuotePrice { ticker: String, month: Month },

    #[error("Projection of goal {goal_id} overflowed in {month}")]
    ProjectionOverflow { goal_id: i64, month: Month },
}

/// Validation errors, raised before any I/O takes place.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid holding id {0}: ids must be positive")]
    InvalidHoldingId(i64),

    #[error("Invalid maximum month count {0}: must be at least 1")]
    InvalidMaxMonths(u32),

    #[error("Goal {goal_id} is unreachable: no contribution, no return and initial value below target")]
    UnreachableGoal { goal_id: i64 },

    #[error("Invalid month range: start {start} is after end {end}")]
    InvalidMonthRange { start: Month, end: Month },

    #[error("Month range from {start} exceeds the allowed length ({count} > {max_months})")]
    MonthRangeTooLong {
        start: Month,
        count: u32,
        max_months: u32,
    },

    #[error("Variable income holding {0} has no ticker")]
    MissingTicker(i64),

    #[error("Failed to parse month '{0}': expected YYYY-MM")]
    MonthParse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Settings(err.to_string())
    }
}
