//! Property-based tests for money values.
//!
//! - `split` preserves the total and is fair to within one subunit
//! - Same-currency arithmetic is exact on whole subunits
//! - Money never mixes with non-zero plain numbers

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::Money;
use coinage_shared::Currency;

fn cents() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

fn currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::all().collect::<Vec<_>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount and party count, the parts sum to the original and
    /// differ pairwise by at most one subunit.
    #[test]
    fn prop_split_is_exact_and_fair(
        cents in cents(),
        currency in currency(),
        count in 1usize..40,
    ) {
        let money = Money::new(cents, currency);
        let parts = money.split(count).unwrap();

        prop_assert_eq!(parts.len(), count);
        let total: Decimal = parts.iter().map(Money::fractional).sum();
        prop_assert_eq!(total, money.fractional());

        let max = parts.iter().map(Money::fractional).max().unwrap();
        let min = parts.iter().map(Money::fractional).min().unwrap();
        prop_assert!(max - min <= Decimal::ONE);
        prop_assert!(parts.iter().all(|p| p.currency() == currency));
    }

    /// *For any* two same-currency values, `(a + b) - b == a`.
    #[test]
    fn prop_add_then_sub_is_identity(a in cents(), b in cents(), currency in currency()) {
        let a = Money::new(a, currency);
        let b = Money::new(b, currency);
        let round_trip = a.checked_add(&b).unwrap().checked_sub(&b).unwrap();
        prop_assert_eq!(round_trip, a);
    }

    /// *For any* value, negation flips the sign and `abs` is never negative.
    #[test]
    fn prop_negation_and_abs(cents in cents(), currency in currency()) {
        let money = Money::new(cents, currency);
        prop_assert_eq!(-(-&money), money.clone());
        prop_assert!(!money.abs().is_negative());
        prop_assert_eq!(money.is_positive(), (-&money).is_negative());
    }

    /// *For any* value and non-zero number, mixing in the number is a type
    /// error while zero is the identity.
    #[test]
    fn prop_plain_numbers_are_rejected(
        cents in cents(),
        number in prop_oneof![1i64..1_000_000, -1_000_000i64..0],
    ) {
        let money = Money::new(cents, Currency::USD);
        prop_assert_eq!(money.checked_add(number).unwrap_err().error_code(), "TYPE_ERROR");
        prop_assert_eq!(money.checked_sub(number).unwrap_err().error_code(), "TYPE_ERROR");
        prop_assert_eq!(money.checked_add(0).unwrap(), money.clone());
        prop_assert!(money.checked_mul(&money).is_err());
    }

    /// *For any* value and divisor, `divmod` satisfies
    /// `quotient * divisor + modulo == value`.
    #[test]
    fn prop_divmod_recombines(
        cents in cents(),
        divisor in prop_oneof![1i64..10_000, -10_000i64..0],
    ) {
        let money = Money::new(cents, Currency::USD);
        let (quotient, modulo) = money.divmod(divisor).unwrap();
        let quotient = quotient.into_money().unwrap();
        let recombined = quotient.fractional() * Decimal::from(divisor) + modulo.fractional();
        prop_assert_eq!(recombined, money.fractional());
        prop_assert!(modulo.is_zero() || modulo.is_negative() == (divisor < 0));
    }
}
