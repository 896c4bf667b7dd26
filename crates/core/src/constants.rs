/// Default cap for month ranges and goal projections.
pub const DEFAULT_MAX_MONTHS: u32 = 120;

/// Default cap for the goal history window (fifty years).
pub const DEFAULT_HISTORY_WINDOW_MAX_MONTHS: u32 = 600;

/// Year of the last month that predates monthly history tracking.
pub const HISTORY_CUTOFF_YEAR: i32 = 2023;

/// Month of the last month that predates monthly history tracking.
pub const HISTORY_CUTOFF_MONTH: u32 = 12;

/// Decimal precision for monetary projections
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Percentages are expressed as `value / base * PERCENT_SCALE`.
pub const PERCENT_SCALE: i64 = 100;
