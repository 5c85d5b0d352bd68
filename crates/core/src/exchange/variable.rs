//! Bank that converts through a rate store.

use std::fmt;
use std::sync::Arc;

use coinage_shared::{Currency, MoneyError, MoneyResult};
use rust_decimal::Decimal;

use super::bank::{Bank, ExchangeRounding};
use super::rate::ExchangeRate;
use super::snapshot::{RateSnapshot, SnapshotFormat};
use super::store::{MemoryRateStore, RateIter, RateStore, RateTable};
use crate::money::Money;

/// Bank applying caller-supplied rates.
///
/// Rates are directed: a `USD -> EUR` rate says nothing about `EUR -> USD`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use coinage_core::{Currency, Money, VariableExchangeBank};
/// use rust_decimal_macros::dec;
///
/// let bank = Arc::new(VariableExchangeBank::new());
/// bank.add_rate(Currency::USD, Currency::EUR, dec!(1.33)).unwrap();
///
/// let dollars = Money::with_bank(100, Currency::USD, bank);
/// let euros = dollars.exchange_to(Currency::EUR).unwrap();
/// assert_eq!(euros.fractional(), dec!(133));
/// ```
pub struct VariableExchangeBank {
    store: Arc<dyn RateStore>,
    rounding: Option<Arc<dyn ExchangeRounding>>,
}

impl VariableExchangeBank {
    /// Creates a bank over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryRateStore::new()))
    }

    /// Creates a bank over a caller-owned store.
    #[must_use]
    pub fn with_store(store: Arc<dyn RateStore>) -> Self {
        Self {
            store,
            rounding: None,
        }
    }

    /// Rounds every conversion with `rounding` unless a call overrides it.
    #[must_use]
    pub fn with_rounding(mut self, rounding: impl ExchangeRounding + 'static) -> Self {
        self.rounding = Some(Arc::new(rounding));
        self
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RateStore> {
        &self.store
    }

    /// Registers the rate for `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `rate` is positive.
    pub fn add_rate(&self, from: Currency, to: Currency, rate: Decimal) -> MoneyResult<()> {
        self.store.add_rate(from.code(), to.code(), rate)
    }

    /// Alias of [`add_rate`](Self::add_rate).
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `rate` is positive.
    pub fn set_rate(&self, from: Currency, to: Currency, rate: Decimal) -> MoneyResult<()> {
        self.add_rate(from, to, rate)
    }

    /// Rate for `from -> to`, if known.
    #[must_use]
    pub fn get_rate(&self, from: Currency, to: Currency) -> Option<Decimal> {
        self.store.get_rate(from.code(), to.code())
    }

    /// Every stored rate, ordered by key.
    #[must_use]
    pub fn each_rate(&self) -> RateIter {
        self.store.each_rate()
    }

    /// Collects the stored rates.
    #[must_use]
    pub fn rates(&self) -> Vec<ExchangeRate> {
        self.each_rate().collect()
    }

    /// Runs `f` against the store's table under one lock acquisition.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `f`.
    pub fn transaction(
        &self,
        f: &mut dyn FnMut(&mut RateTable) -> MoneyResult<()>,
    ) -> MoneyResult<()> {
        self.store.transaction(f)
    }

    /// Serializes the stored rates.
    ///
    /// # Errors
    ///
    /// Returns a validation error if serialization fails.
    pub fn export_rates(&self, format: SnapshotFormat) -> MoneyResult<String> {
        RateSnapshot::capture(self.store.as_ref()).export(format)
    }

    /// Loads rates from serialized text, returning how many were loaded.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed text or non-positive rates.
    pub fn import_rates(&self, format: SnapshotFormat, text: &str) -> MoneyResult<usize> {
        RateSnapshot::parse(format, text)?.restore_into(self.store.as_ref())
    }

    /// Converted amount in `to` subunits, before any rounding.
    ///
    /// Multiplication happens before the single division so the unit ratio
    /// and rate do not compound rounding error.
    fn convert(from: &Money, to: Currency, rate: Decimal) -> MoneyResult<Decimal> {
        from.fractional()
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(to.subunit_ratio_decimal()))
            .and_then(|v| v.checked_div(from.currency().subunit_ratio_decimal()))
            .ok_or_else(|| {
                MoneyError::validation(format!("Conversion of {from} to {to} overflows"))
            })
    }
}

impl Default for VariableExchangeBank {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VariableExchangeBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableExchangeBank")
            .field("rates", &self.store.len())
            .field("rounding", &self.rounding.is_some())
            .finish()
    }
}

impl Bank for VariableExchangeBank {
    fn exchange_with(
        &self,
        from: &Money,
        to: Currency,
        rounding: Option<&dyn ExchangeRounding>,
    ) -> MoneyResult<Money> {
        if from.currency() == to {
            return Ok(from.clone());
        }

        let Some(rate) = self.get_rate(from.currency(), to) else {
            tracing::warn!(from = %from.currency(), to = %to, "No exchange rate registered");
            return Err(MoneyError::UnknownRate {
                from: from.currency().code().to_string(),
                to: to.code().to_string(),
            });
        };

        let converted = Self::convert(from, to, rate)?;
        let converted = match rounding.or(self.rounding.as_deref()) {
            Some(strategy) => strategy.round(converted),
            None => converted,
        };

        tracing::debug!(
            from = %from.currency(),
            to = %to,
            rate = %rate,
            amount = %from.fractional(),
            converted = %converted,
            "Money exchanged"
        );
        Ok(from.rebuild(converted, to))
    }
}
