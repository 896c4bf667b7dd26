//! Asset transactions - purchases and sales against a holding.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{AssetTransaction, TransactionType};
pub use transactions_traits::TransactionRepositoryTrait;
