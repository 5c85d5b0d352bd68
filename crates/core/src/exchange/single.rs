//! Bank for single-currency applications.

use coinage_shared::{Currency, MoneyError, MoneyResult};

use super::bank::{Bank, ExchangeRounding};
use crate::money::Money;

/// Bank that rejects every conversion.
///
/// Binding money to this bank turns accidental cross-currency arithmetic
/// into a [`MoneyError::DifferentCurrency`] instead of a silent conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleCurrencyBank;

impl Bank for SingleCurrencyBank {
    fn exchange_with(
        &self,
        from: &Money,
        to: Currency,
        _rounding: Option<&dyn ExchangeRounding>,
    ) -> MoneyResult<Money> {
        if from.currency() == to {
            return Ok(from.clone());
        }

        Err(MoneyError::DifferentCurrency {
            from: from.currency().code().to_string(),
            to: to.code().to_string(),
        })
    }
}
