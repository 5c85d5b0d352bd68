//! Exchange rate types and rate keys.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Separator between the two codes of a rate key.
pub const RATE_KEY_SEPARATOR: &str = "_TO_";

/// Builds the normalized key for a directed currency pair.
///
/// # Example
///
/// ```
/// use coinage_core::exchange::rate_key;
///
/// assert_eq!(rate_key("usd", "Eur"), "USD_TO_EUR");
/// ```
#[must_use]
pub fn rate_key(from: &str, to: &str) -> String {
    format!(
        "{}{RATE_KEY_SEPARATOR}{}",
        from.trim().to_ascii_uppercase(),
        to.trim().to_ascii_uppercase()
    )
}

/// Splits a rate key back into its source and target codes.
#[must_use]
pub fn split_rate_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(RATE_KEY_SEPARATOR)
        .filter(|(from, to)| !from.is_empty() && !to.is_empty())
}

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    pub from_currency: String,
    /// Target currency code.
    pub to_currency: String,
    /// Exchange rate (1 from_currency = rate to_currency).
    pub rate: Decimal,
}

impl ExchangeRate {
    /// Creates a new exchange rate, upper-casing both codes.
    #[must_use]
    pub fn new(from_currency: &str, to_currency: &str, rate: Decimal) -> Self {
        Self {
            from_currency: from_currency.trim().to_ascii_uppercase(),
            to_currency: to_currency.trim().to_ascii_uppercase(),
            rate,
        }
    }

    /// Normalized key of this pair.
    #[must_use]
    pub fn key(&self) -> String {
        rate_key(&self.from_currency, &self.to_currency)
    }
}
