//! Calendar months - the engine's time axis.

mod month_model;
mod month_range;

pub use month_model::Month;
pub use month_range::{build_default_month_range, build_month_range};
