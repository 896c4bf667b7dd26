//! Holdings - tracked positions and their storage boundary.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::{Asset, AssetType, Brokerage, Holding};
pub use holdings_traits::HoldingRepositoryTrait;
