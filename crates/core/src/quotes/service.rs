use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;

use super::model::MonthlyQuote;
use crate::errors::{CalculatorError, Result};
use crate::months::Month;

/// Source of end-of-month prices.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn get_quote(&self, ticker: &str, month: Month) -> Result<MonthlyQuote>;
}

/// Picks the price used for a snapshot: `close`, then `adjusted_close`.
///
/// A quote with neither price is an error; gaps in price data must surface
/// instead of turning into a zero valuation.
pub fn resolve_quote_price(quote: &MonthlyQuote, ticker: &str, month: Month) -> Result<Decimal> {
    if let Some(close) = quote.close {
        return Ok(close);
    }
    if let Some(adjusted_close) = quote.adjusted_close {
        warn!(
            "No close price for {} in {}; using adjusted close {}",
            ticker, month, adjusted_close
        );
        return Ok(adjusted_close);
    }
    Err(CalculatorError::MissingQuotePrice {
        ticker: ticker.to_string(),
        month,
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn month() -> Month {
        Month::new(2024, 6).unwrap()
    }

    #[test]
    fn test_close_wins_over_adjusted_close() {
        let quote = MonthlyQuote::new(Some(dec!(52.0)), Some(dec!(50.0)));
        assert_eq!(resolve_quote_price(&quote, "PETR4", month()).unwrap(), dec!(52.0));
    }

    #[test]
    fn test_falls_back_to_adjusted_close() {
        let quote = MonthlyQuote::new(None, Some(dec!(45.0)));
        assert_eq!(resolve_quote_price(&quote, "PETR4", month()).unwrap(), dec!(45.0));
    }

    #[test]
    fn test_missing_prices_fail() {
        let err = resolve_quote_price(&MonthlyQuote::default(), "PETR4", month()).unwrap_err();
        assert!(matches!(
            err,
            Error::Calculation(CalculatorError::MissingQuotePrice { .. })
        ));
    }
}
