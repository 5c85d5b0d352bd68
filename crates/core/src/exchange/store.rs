//! Thread-safe exchange rate storage.
//!
//! A [`RateStore`] maps directed currency pairs to positive rates. Every read
//! and write holds the store's lock for its whole duration;
//! [`RateStore::transaction`] batches several operations under one
//! acquisition.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;

use super::rate::{ExchangeRate, rate_key};

/// Unlocked rate table, reachable only through a store's lock.
#[derive(Debug, Default, Clone)]
pub struct RateTable {
    rates: BTreeMap<String, ExchangeRate>,
}

impl RateTable {
    /// Inserts or replaces the rate for `from -> to`.
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `rate` is positive and both codes
    /// are non-empty.
    pub fn add_rate(&mut self, from: &str, to: &str, rate: Decimal) -> MoneyResult<()> {
        if rate <= Decimal::ZERO {
            return Err(MoneyError::validation(format!(
                "Exchange rate must be positive, got {rate} for {from} -> {to}"
            )));
        }
        if from.trim().is_empty() || to.trim().is_empty() {
            return Err(MoneyError::validation("Currency codes must not be empty"));
        }

        let rate = ExchangeRate::new(from, to, rate);
        self.rates.insert(rate.key(), rate);
        Ok(())
    }

    /// Rate for `from -> to`, if one is stored.
    #[must_use]
    pub fn get_rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.rates.get(&rate_key(from, to)).map(|r| r.rate)
    }

    /// Rates ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.values()
    }

    /// Number of stored pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when no rate is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Iterator over a point-in-time copy of a store's rates.
///
/// Call [`RateStore::each_rate`] again to restart from a fresh copy.
#[derive(Debug)]
pub struct RateIter(std::vec::IntoIter<ExchangeRate>);

impl Iterator for RateIter {
    type Item = ExchangeRate;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for RateIter {}

/// Pluggable rate storage.
pub trait RateStore: Send + Sync + fmt::Debug {
    /// Stores `rate` for `from -> to`, replacing any previous rate.
    fn add_rate(&self, from: &str, to: &str, rate: Decimal) -> MoneyResult<()>;

    /// Rate for `from -> to`, or `None` when unknown.
    fn get_rate(&self, from: &str, to: &str) -> Option<Decimal>;

    /// Snapshot of every stored rate, ordered by key.
    fn each_rate(&self) -> RateIter;

    /// Runs `f` against the table while holding the lock once.
    ///
    /// Every read and write inside `f` goes through the `&mut RateTable`
    /// handle. The lock is not reentrant: calling this store's own methods,
    /// or exchanging through a bank over it, from inside `f` deadlocks.
    ///
    /// Changes made before `f` returns an error are kept.
    fn transaction(
        &self,
        f: &mut dyn FnMut(&mut RateTable) -> MoneyResult<()>,
    ) -> MoneyResult<()>;

    /// Number of stored pairs.
    fn len(&self) -> usize;

    /// True when no rate is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store guarded by a single mutex.
#[derive(Debug, Default)]
pub struct MemoryRateStore {
    table: Mutex<RateTable>,
}

impl MemoryRateStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `(from, to, rate)` triples.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid rate.
    pub fn with_rates<'a>(
        rates: impl IntoIterator<Item = (&'a str, &'a str, Decimal)>,
    ) -> MoneyResult<Self> {
        let mut table = RateTable::default();
        for (from, to, rate) in rates {
            table.add_rate(from, to, rate)?;
        }
        Ok(Self {
            table: Mutex::new(table),
        })
    }

    /// The table holds plain data, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, RateTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateStore for MemoryRateStore {
    fn add_rate(&self, from: &str, to: &str, rate: Decimal) -> MoneyResult<()> {
        self.lock().add_rate(from, to, rate)?;
        tracing::debug!(from, to, rate = %rate, "Exchange rate stored");
        Ok(())
    }

    fn get_rate(&self, from: &str, to: &str) -> Option<Decimal> {
        self.lock().get_rate(from, to)
    }

    fn each_rate(&self) -> RateIter {
        let rates: Vec<ExchangeRate> = self.lock().iter().cloned().collect();
        RateIter(rates.into_iter())
    }

    fn transaction(
        &self,
        f: &mut dyn FnMut(&mut RateTable) -> MoneyResult<()>,
    ) -> MoneyResult<()> {
        let mut table = self.lock();
        f(&mut table)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    #[test]
    fn test_add_and_get_rate() {
        let store = MemoryRateStore::new();
        store.add_rate("USD", "EUR", dec!(0.9)).unwrap();
        assert_eq!(store.get_rate("USD", "EUR"), Some(dec!(0.9)));
        assert_eq!(store.get_rate("EUR", "USD"), None);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let store = MemoryRateStore::new();
        store.add_rate("usd", "cad", dec!(1.35)).unwrap();
        assert_eq!(store.get_rate("USD", "CAD"), Some(dec!(1.35)));

        store.add_rate("USD", "Cad", dec!(1.36)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_rate("usd", "cad"), Some(dec!(1.36)));
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        let store = MemoryRateStore::new();
        assert!(store.add_rate("USD", "EUR", Decimal::ZERO).is_err());
        assert!(store.add_rate("USD", "EUR", dec!(-1)).is_err());
        assert!(store.add_rate("", "EUR", dec!(1)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_each_rate_is_restartable() {
        let store = MemoryRateStore::with_rates([
            ("USD", "EUR", dec!(0.9)),
            ("EUR", "USD", dec!(1.1)),
        ])
        .unwrap();

        let first: Vec<_> = store.each_rate().collect();
        let second: Vec<_> = store.each_rate().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        // Ordered by key
        assert_eq!(first[0].key(), "EUR_TO_USD");
        assert_eq!(first[1].key(), "USD_TO_EUR");
    }

    #[test]
    fn test_each_rate_is_a_snapshot() {
        let store = MemoryRateStore::new();
        store.add_rate("USD", "EUR", dec!(0.9)).unwrap();

        let iter = store.each_rate();
        store.add_rate("USD", "GBP", dec!(0.8)).unwrap();

        assert_eq!(iter.count(), 1);
        assert_eq!(store.each_rate().count(), 2);
    }

    #[test]
    fn test_transaction_batches_operations() {
        let store = MemoryRateStore::new();
        store
            .transaction(&mut |table| {
                table.add_rate("USD", "EUR", dec!(0.9))?;
                table.add_rate("EUR", "USD", dec!(1.1))?;
                assert_eq!(table.get_rate("USD", "EUR"), Some(dec!(0.9)));
                Ok(())
            })
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_transaction_reads_and_writes_through_table() {
        let store = MemoryRateStore::with_rates([("USD", "EUR", dec!(0.9))]).unwrap();
        store
            .transaction(&mut |table| {
                let rate = table.get_rate("usd", "eur").unwrap_or(Decimal::ONE);
                table.add_rate("EUR", "USD", Decimal::ONE / rate)?;
                table.add_rate("USD", "EUR", rate * dec!(2))?;
                assert_eq!(table.len(), 2);
                Ok(())
            })
            .unwrap();

        // The lock is released once the closure returns
        assert_eq!(store.get_rate("USD", "EUR"), Some(dec!(1.8)));
        assert_eq!(store.get_rate("EUR", "USD").map(|r| r.round_dp(4)), Some(dec!(1.1111)));
    }

    #[test]
    fn test_transaction_propagates_errors() {
        let store = MemoryRateStore::new();
        let result = store.transaction(&mut |table| {
            table.add_rate("USD", "EUR", dec!(0.9))?;
            table.add_rate("USD", "GBP", dec!(0))
        });
        assert!(result.is_err());
        assert_eq!(store.get_rate("USD", "EUR"), Some(dec!(0.9)));
    }

    #[test]
    fn test_concurrent_inserts_are_not_lost() {
        let store = Arc::new(MemoryRateStore::new());
        let codes: Vec<String> = (0..64).map(|i| format!("C{i:02}")).collect();

        std::thread::scope(|scope| {
            for code in &codes {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    store.add_rate("USD", code, dec!(1.5)).unwrap();
                });
            }
        });

        assert_eq!(store.len(), codes.len());
        for code in &codes {
            assert_eq!(store.get_rate("USD", code), Some(dec!(1.5)));
        }
    }
}
