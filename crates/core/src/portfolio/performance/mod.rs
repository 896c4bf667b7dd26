//! Calculation rules for cash flow, appreciation and growth.

pub mod performance_calculator;
mod performance_model;

pub use performance_calculator::{effective_base, percentage_or_zero};
pub use performance_model::{Appreciation, Growth, TransactionBalance};
