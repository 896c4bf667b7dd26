//! Engine settings.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HISTORY_WINDOW_MAX_MONTHS, DEFAULT_MAX_MONTHS, HISTORY_CUTOFF_MONTH,
    HISTORY_CUTOFF_YEAR,
};
use crate::errors::{Error, Result};
use crate::months::Month;

/// Tunables shared by the reconciliation engine and the goal services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Months up to and including this one always get a zero placeholder.
    pub history_cutoff: Month,
    /// Cap for goal projections and month ranges.
    pub default_max_months: u32,
    /// Cap for the goal history window.
    pub history_window_max_months: u32,
    /// Store `quote price * quantity` instead of the raw quote price for
    /// variable income snapshots.
    pub value_variable_income_by_quantity: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_cutoff: default_history_cutoff(),
            default_max_months: DEFAULT_MAX_MONTHS,
            history_window_max_months: DEFAULT_HISTORY_WINDOW_MAX_MONTHS,
            value_variable_income_by_quantity: false,
        }
    }
}

impl Settings {
    /// Parses settings from JSON; missing keys take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(raw)?;
        settings.validate()?;
        debug!("Loaded engine settings: {:?}", settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_max_months == 0 {
            return Err(Error::Settings(
                "defaultMaxMonths must be at least 1".to_string(),
            ));
        }
        if self.history_window_max_months == 0 {
            return Err(Error::Settings(
                "historyWindowMaxMonths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_before_history(&self, month: Month) -> bool {
        month <= self.history_cutoff
    }
}

fn default_history_cutoff() -> Month {
    Month::new(HISTORY_CUTOFF_YEAR, HISTORY_CUTOFF_MONTH)
        .unwrap_or_else(|_| Month::from_date(chrono::NaiveDate::MIN))
}
