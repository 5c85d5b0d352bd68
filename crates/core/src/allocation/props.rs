//! Property-based tests for the allocation engine.
//!
//! - Shares always sum to the allocated amount
//! - A single party receives everything
//! - Equal splits differ by at most one unit

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Allocation, Cutoff, Parts};

/// Amounts from -1,000,000.00 to 1,000,000.00 in subunits.
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(Decimal::from)
}

/// Non-negative weights with up to two decimal places.
fn weights() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((0i64..10_000i64).prop_map(|v| Decimal::new(v, 2)), 1..12)
}

/// Bounded cutoffs. Exact shares carry 28 significant digits, so their sums
/// are only checked in the unit tests.
fn cutoff() -> impl Strategy<Value = Cutoff> {
    prop_oneof![
        Just(Cutoff::Whole),
        (0u32..=4).prop_map(Cutoff::DecimalPlaces),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* amount, weights and cutoff, the shares sum to the amount.
    #[test]
    fn prop_shares_sum_to_amount(
        amount in amount(),
        weights in weights(),
        cutoff in cutoff(),
    ) {
        let count = weights.len();
        let shares = Allocation::allocate(amount, weights, cutoff).unwrap();
        prop_assert_eq!(shares.len(), count);
        prop_assert_eq!(shares.iter().copied().sum::<Decimal>(), amount);
    }

    /// *For any* amount and weight, one party takes the whole amount.
    #[test]
    fn prop_single_party_identity(
        amount in amount(),
        weight in (0i64..10_000i64).prop_map(Decimal::from),
    ) {
        let shares = Allocation::allocate(amount, vec![weight], Cutoff::Whole).unwrap();
        prop_assert_eq!(shares, vec![amount]);
    }

    /// *For any* whole amount and party count, equal shares differ by at
    /// most one unit and larger shares come first.
    #[test]
    fn prop_equal_split_is_fair(amount in amount(), count in 1usize..50) {
        let shares = Allocation::allocate(amount, Parts::Count(count), Cutoff::Whole).unwrap();
        let max = shares.iter().map(|s| s.abs()).max().unwrap();
        let min = shares.iter().map(|s| s.abs()).min().unwrap();
        prop_assert!(max - min <= Decimal::ONE);
        for pair in shares.windows(2) {
            prop_assert!(pair[0].abs() >= pair[1].abs());
        }
    }

    /// *For any* whole amount, whole cutoff never produces fractions.
    #[test]
    fn prop_whole_cutoff_yields_whole_shares(amount in amount(), weights in weights()) {
        let shares = Allocation::allocate(amount, weights, Cutoff::Whole).unwrap();
        for share in shares {
            prop_assert_eq!(share.fract(), Decimal::ZERO);
        }
    }
}
