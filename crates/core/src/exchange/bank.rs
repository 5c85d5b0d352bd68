//! The `Bank` trait and exchange rounding strategies.

use std::fmt;

use coinage_shared::{Currency, MoneyResult};
use rust_decimal::Decimal;

use crate::money::Money;
use crate::rounding::RoundingMode;

/// Converts money between currencies.
pub trait Bank: Send + Sync + fmt::Debug {
    /// Converts `from` into `to`.
    ///
    /// Same-currency requests return `from` unchanged. `rounding`, when
    /// given, takes priority over any rounding the bank was built with.
    fn exchange_with(
        &self,
        from: &Money,
        to: Currency,
        rounding: Option<&dyn ExchangeRounding>,
    ) -> MoneyResult<Money>;
}

/// Narrows a precise converted amount (in subunits) before it becomes money.
pub trait ExchangeRounding: Send + Sync {
    /// Rounds a converted subunit amount.
    fn round(&self, converted: Decimal) -> Decimal;
}

impl<F> ExchangeRounding for F
where
    F: Fn(Decimal) -> Decimal + Send + Sync,
{
    fn round(&self, converted: Decimal) -> Decimal {
        self(converted)
    }
}

/// Rounds to whole subunits with the mode.
impl ExchangeRounding for RoundingMode {
    fn round(&self, converted: Decimal) -> Decimal {
        self.apply(converted, 0)
    }
}
