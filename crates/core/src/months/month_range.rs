use crate::constants::DEFAULT_MAX_MONTHS;
use crate::errors::{Result, ValidationError};

use super::Month;

/// Builds the inclusive run of consecutive months from `start` to `end`.
///
/// Fails when `start > end`, when `max_months` is zero, or as soon as the run
/// grows past `max_months` entries.
pub fn build_month_range(start: Month, end: Month, max_months: u32) -> Result<Vec<Month>> {
    if max_months < 1 {
        return Err(ValidationError::InvalidMaxMonths(max_months).into());
    }
    if start > end {
        return Err(ValidationError::InvalidMonthRange { start, end }.into());
    }

    let mut months = Vec::new();
    let mut current = start;
    while current <= end {
        months.push(current);
        if months.len() > max_months as usize {
            return Err(ValidationError::MonthRangeTooLong {
                start,
                count: months.len() as u32,
                max_months,
            }
            .into());
        }
        current = current.next();
    }
    Ok(months)
}

/// [`build_month_range`] with the default cap of 120 months.
pub fn build_default_month_range(start: Month, end: Month) -> Result<Vec<Month>> {
    build_month_range(start, end, DEFAULT_MAX_MONTHS)
}
