//! Quote lookups for variable income holdings.
//!
//! - [`model`] - The monthly quote returned by the price source
//! - [`service`] - The quote source trait and price resolution rules

pub mod model;
pub mod service;

pub use model::MonthlyQuote;
pub use service::{resolve_quote_price, QuoteServiceTrait};
