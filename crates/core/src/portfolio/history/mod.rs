//! Monthly holding history - snapshots, creation strategies and reconciliation.

mod history_model;
mod history_traits;
pub mod holding_performance_service;
pub mod reconciliation_service;
pub mod snapshot_strategy;

pub use history_model::*;
pub use history_traits::*;
pub use holding_performance_service::*;
pub use reconciliation_service::*;
pub use snapshot_strategy::*;
