//! Quote domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// End-of-month prices for a ticker. Either price may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyQuote {
    pub close: Option<Decimal>,
    pub adjusted_close: Option<Decimal>,
}

impl MonthlyQuote {
    pub fn new(close: Option<Decimal>, adjusted_close: Option<Decimal>) -> Self {
        Self {
            close,
            adjusted_close,
        }
    }
}
