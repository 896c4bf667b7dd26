//! Investfolio Core - monthly holding snapshots and goal tracking.
//!
//! This crate contains the computation layer that keeps one end-of-month
//! snapshot per holding, aggregates those snapshots into per-goal history and
//! projects savings goals forward. It is storage-agnostic: persistence and
//! quote lookups are reached through the traits each module defines.

pub mod constants;
pub mod errors;
pub mod goals;
pub mod holdings;
pub mod months;
pub mod portfolio;
pub mod quotes;
pub mod settings;
pub mod transactions;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use months::Month;
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
