//! Property-based tests for exchange.
//!
//! - Identity exchange returns the value unchanged
//! - Conversion matches `fractional * rate` scaled by subunit ratios
//! - A round trip through `r` and `1 / r` lands within one subunit
//! - Concurrent writers never lose a rate

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{MemoryRateStore, RateStore, VariableExchangeBank};
use crate::money::Money;
use crate::rounding::RoundingMode;
use coinage_shared::Currency;

fn cents() -> impl Strategy<Value = i64> {
    -100_000_000i64..100_000_000i64
}

/// Rates from 1.0000 to 1,000.0000.
fn rate_at_least_one() -> impl Strategy<Value = Decimal> {
    (10_000i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Rates from 0.0001 to 1,000.0000.
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* value, exchanging into its own currency needs no rate and
    /// changes nothing.
    #[test]
    fn prop_identity_exchange(cents in cents()) {
        let money = Money::with_bank(cents, Currency::EUR, Arc::new(VariableExchangeBank::new()));
        prop_assert_eq!(money.exchange_to(Currency::EUR).unwrap(), money);
    }

    /// *For any* amount and rate, USD -> EUR yields `cents * rate` rounded
    /// half up to a whole cent.
    #[test]
    fn prop_exchange_applies_rate(cents in cents(), rate in positive_rate()) {
        let bank = VariableExchangeBank::new();
        bank.add_rate(Currency::USD, Currency::EUR, rate).unwrap();
        let money = Money::with_bank(cents, Currency::USD, Arc::new(bank));

        let converted = money.exchange_to(Currency::EUR).unwrap();
        let expected = RoundingMode::HalfUp.apply(Decimal::from(cents) * rate, 0);
        prop_assert_eq!(converted.fractional(), expected);
        prop_assert_eq!(converted.currency(), Currency::EUR);
    }

    /// *For any* amount and rate `r >= 1`, converting with `r` and back with
    /// `1 / r` returns within one subunit of the start.
    #[test]
    fn prop_round_trip_within_one_subunit(cents in cents(), rate in rate_at_least_one()) {
        let bank = VariableExchangeBank::new();
        bank.add_rate(Currency::USD, Currency::EUR, rate).unwrap();
        bank.add_rate(Currency::EUR, Currency::USD, Decimal::ONE / rate).unwrap();
        let money = Money::with_bank(cents, Currency::USD, Arc::new(bank));

        let back = money
            .exchange_to(Currency::EUR)
            .and_then(|eur| eur.exchange_to(Currency::USD))
            .unwrap();
        prop_assert!((back.fractional() - money.fractional()).abs() <= Decimal::ONE);
    }

    /// *For any* number of writer threads with distinct pairs, every rate
    /// survives.
    #[test]
    fn prop_concurrent_inserts(threads in 1usize..24) {
        let store = MemoryRateStore::new();
        std::thread::scope(|scope| {
            for i in 0..threads {
                let store = &store;
                scope.spawn(move || {
                    store
                        .add_rate(&format!("C{i}"), "USD", Decimal::from(i + 1))
                        .unwrap();
                });
            }
        });
        prop_assert_eq!(store.len(), threads);
        prop_assert_eq!(store.each_rate().count(), threads);
    }
}
