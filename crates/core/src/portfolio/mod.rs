//! Portfolio module - monthly holding history and performance rules.

pub mod history;
pub mod performance;

pub use history::*;
pub use performance::*;
