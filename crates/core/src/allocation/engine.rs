//! Allocation engine.
//!
//! Weights are swept right to left. Each share is the remaining amount times
//! the weight over the remaining weight, cut off to the requested precision,
//! and the last non-zero weight takes whatever is left. The shares therefore
//! sum to the original amount exactly and any leftover subunits land on the
//! earliest parties.

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;

use crate::rounding;

/// How to divide an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parts {
    /// `n` equal parties.
    Count(usize),
    /// One party per weight, proportional to it.
    Weights(Vec<Decimal>),
}

impl Parts {
    /// Resolves to a validated, non-empty weight list.
    ///
    /// All-zero weights mean "equal shares" and become ones.
    fn into_weights(self) -> MoneyResult<Vec<Decimal>> {
        let weights = match self {
            Self::Count(0) => {
                return Err(MoneyError::validation("Need at least one party"));
            }
            Self::Count(n) => vec![Decimal::ONE; n],
            Self::Weights(weights) => weights,
        };

        if weights.is_empty() {
            return Err(MoneyError::validation("Need at least one party"));
        }
        if let Some(negative) = weights.iter().find(|w| w.is_sign_negative() && !w.is_zero()) {
            return Err(MoneyError::validation(format!(
                "Weights must not be negative, got {negative}"
            )));
        }
        if weights.iter().all(Decimal::is_zero) {
            return Ok(vec![Decimal::ONE; weights.len()]);
        }
        Ok(weights)
    }
}

impl From<usize> for Parts {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Vec<Decimal>> for Parts {
    fn from(weights: Vec<Decimal>) -> Self {
        Self::Weights(weights)
    }
}

impl From<&[Decimal]> for Parts {
    fn from(weights: &[Decimal]) -> Self {
        Self::Weights(weights.to_vec())
    }
}

impl<const N: usize> From<[Decimal; N]> for Parts {
    fn from(weights: [Decimal; N]) -> Self {
        Self::Weights(weights.to_vec())
    }
}

/// Precision each share is cut to before the next one is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cutoff {
    /// Whole units, truncated toward zero.
    #[default]
    Whole,
    /// `n` decimal places, rounded with the ambient rounding mode.
    DecimalPlaces(u32),
    /// No cutoff.
    Exact,
}

impl Cutoff {
    fn apply(self, share: Decimal) -> Decimal {
        match self {
            Self::Whole => share.trunc(),
            Self::DecimalPlaces(places) => rounding::rounding_mode().apply(share, places),
            Self::Exact => share,
        }
    }
}

/// `true` cuts to whole units, `false` keeps exact shares.
impl From<bool> for Cutoff {
    fn from(whole: bool) -> Self {
        if whole { Self::Whole } else { Self::Exact }
    }
}

impl From<u32> for Cutoff {
    fn from(places: u32) -> Self {
        Self::DecimalPlaces(places)
    }
}

/// Allocation entry point.
pub struct Allocation;

impl Allocation {
    /// Splits `amount` into shares proportional to `parts`.
    ///
    /// The result has one share per party and sums to `amount` exactly.
    ///
    /// # Errors
    ///
    /// Returns a validation error for zero parties, an empty or negative
    /// weight list, or an intermediate overflow.
    ///
    /// # Example
    ///
    /// ```
    /// use coinage_core::allocation::{Allocation, Cutoff, Parts};
    /// use rust_decimal_macros::dec;
    ///
    /// let shares = Allocation::allocate(dec!(100), Parts::Count(3), Cutoff::Whole).unwrap();
    /// assert_eq!(shares, [dec!(34), dec!(33), dec!(33)]);
    /// ```
    pub fn allocate(
        amount: Decimal,
        parts: impl Into<Parts>,
        cutoff: impl Into<Cutoff>,
    ) -> MoneyResult<Vec<Decimal>> {
        let weights = parts.into().into_weights()?;
        let cutoff = cutoff.into();

        let mut remaining_weight = weights
            .iter()
            .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
            .ok_or_else(|| MoneyError::validation("Sum of weights overflows"))?;
        let mut remaining_amount = amount;
        let mut shares = vec![Decimal::ZERO; weights.len()];

        for (slot, &weight) in shares.iter_mut().zip(&weights).rev() {
            let share = if remaining_weight == weight {
                remaining_amount
            } else if remaining_weight > Decimal::ZERO {
                let exact = remaining_amount
                    .checked_mul(weight)
                    .and_then(|v| v.checked_div(remaining_weight))
                    .ok_or_else(|| {
                        MoneyError::validation(format!("Allocation of {amount} overflows"))
                    })?;
                cutoff.apply(exact)
            } else {
                Decimal::ZERO
            };

            *slot = share;
            remaining_amount -= share;
            remaining_weight -= weight;
        }

        Ok(shares)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::{RoundingMode, with_rounding_mode};
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_equal_split_gives_leftover_to_first() {
        let shares = Allocation::allocate(dec!(100), Parts::Count(3), Cutoff::Whole).unwrap();
        assert_eq!(shares, [dec!(34), dec!(33), dec!(33)]);
    }

    #[rstest]
    #[case(dec!(10), vec![dec!(1), dec!(1), dec!(2)], vec![dec!(3), dec!(2), dec!(5)])]
    #[case(dec!(100), vec![dec!(0), dec!(0)], vec![dec!(50), dec!(50)])]
    #[case(dec!(100), vec![dec!(0.5), dec!(0.5)], vec![dec!(50), dec!(50)])]
    #[case(dec!(5), vec![dec!(1), dec!(1), dec!(1), dec!(1)], vec![dec!(2), dec!(1), dec!(1), dec!(1)])]
    #[case(dec!(100), vec![dec!(1), dec!(0), dec!(0)], vec![dec!(100), dec!(0), dec!(0)])]
    #[case(dec!(100), vec![dec!(0), dec!(3), dec!(0)], vec![dec!(0), dec!(100), dec!(0)])]
    fn test_weighted_whole_allocation(
        #[case] amount: Decimal,
        #[case] weights: Vec<Decimal>,
        #[case] expected: Vec<Decimal>,
    ) {
        let shares = Allocation::allocate(amount, weights, Cutoff::Whole).unwrap();
        assert_eq!(shares, expected);
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(1))]
    #[case(dec!(7.5))]
    fn test_single_party_takes_everything(#[case] weight: Decimal) {
        let shares = Allocation::allocate(dec!(1234), [weight], Cutoff::Whole).unwrap();
        assert_eq!(shares, [dec!(1234)]);
    }

    #[test]
    fn test_negative_amount_mirrors_positive() {
        let shares = Allocation::allocate(dec!(-100), Parts::Count(3), Cutoff::Whole).unwrap();
        assert_eq!(shares, [dec!(-34), dec!(-33), dec!(-33)]);
    }

    #[test]
    fn test_decimal_places_cutoff() {
        let shares =
            Allocation::allocate(dec!(100), Parts::Count(3), Cutoff::DecimalPlaces(2)).unwrap();
        // 66.67 / 2 = 33.335 rounds half up in the middle slot
        assert_eq!(shares, [dec!(33.33), dec!(33.34), dec!(33.33)]);
    }

    #[test]
    fn test_decimal_places_cutoff_follows_rounding_mode() {
        // 10 / 4 = 2.5 at zero places
        let shares = with_rounding_mode(RoundingMode::Up, || {
            Allocation::allocate(dec!(10), Parts::Count(4), 0_u32).unwrap()
        });
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(10));
        assert_eq!(shares[3], dec!(3));
    }

    #[test]
    fn test_exact_cutoff_sums_exactly() {
        let shares = Allocation::allocate(dec!(100), Parts::Count(3), false).unwrap();
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(100));
        assert_ne!(shares[2].fract(), Decimal::ZERO);
    }

    #[test]
    fn test_cutoff_conversions() {
        assert_eq!(Cutoff::from(true), Cutoff::Whole);
        assert_eq!(Cutoff::from(false), Cutoff::Exact);
        assert_eq!(Cutoff::from(2_u32), Cutoff::DecimalPlaces(2));
        assert_eq!(Cutoff::default(), Cutoff::Whole);
    }

    #[test]
    fn test_rejects_invalid_parts() {
        let err = Allocation::allocate(dec!(100), Parts::Count(0), Cutoff::Whole).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        assert!(Allocation::allocate(dec!(100), Vec::<Decimal>::new(), Cutoff::Whole).is_err());
        assert!(
            Allocation::allocate(dec!(100), vec![dec!(1), dec!(-1)], Cutoff::Whole).is_err()
        );
    }

    #[test]
    fn test_zero_amount() {
        let shares = Allocation::allocate(Decimal::ZERO, Parts::Count(3), Cutoff::Whole).unwrap();
        assert_eq!(shares, [Decimal::ZERO; 3]);
    }
}
