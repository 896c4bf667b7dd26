use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::months::Month;

/// Default timezone for reference dates.
/// Month boundaries are decided in this timezone, not in UTC.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::America::Sao_Paulo;

/// Converts a UTC instant to a valuation date in the given timezone.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}

/// The live, in-progress calendar month.
pub fn current_month() -> Month {
    Month::from_date(valuation_date_today())
}
