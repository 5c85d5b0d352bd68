//! The money value type.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Magnitudes are `rust_decimal::Decimal` counts of subunits.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use coinage_shared::{Currency, MoneyError, MoneyResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::allocation::{Allocation, Cutoff, Parts};
use crate::context;
use crate::exchange::{Bank, ExchangeRounding};
use crate::rounding::{self, RoundingMode};

/// A currency-tagged amount bound to an exchange bank.
///
/// Values are immutable; every operation returns a new `Money`.
///
/// Unless infinite precision is active, constructors round the magnitude to
/// a whole subunit with the ambient rounding mode.
#[derive(Clone)]
pub struct Money {
    fractional: Decimal,
    currency: Currency,
    bank: Arc<dyn Bank>,
}

impl Money {
    /// Creates money from a subunit count, bound to the default bank.
    ///
    /// # Example
    ///
    /// ```
    /// use coinage_core::{Currency, Money};
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(1050.5), Currency::USD);
    /// assert_eq!(price.fractional(), dec!(1051));
    /// assert_eq!(price.amount(), dec!(10.51));
    /// ```
    pub fn new(fractional: impl Into<Decimal>, currency: Currency) -> Self {
        Self::with_bank(fractional, currency, context::default_bank())
    }

    /// Creates money bound to `bank`.
    pub fn with_bank(
        fractional: impl Into<Decimal>,
        currency: Currency,
        bank: Arc<dyn Bank>,
    ) -> Self {
        Self {
            fractional: Self::narrow(fractional.into()),
            currency,
            bank,
        }
    }

    /// Creates money in the default currency.
    pub fn in_default_currency(fractional: impl Into<Decimal>) -> Self {
        Self::new(fractional, context::default_currency())
    }

    /// Creates money from a major-unit amount (dollars rather than cents).
    ///
    /// # Errors
    ///
    /// Returns a validation error when scaling to subunits overflows.
    pub fn from_amount(amount: impl Into<Decimal>, currency: Currency) -> MoneyResult<Self> {
        let amount = amount.into();
        let fractional = amount
            .checked_mul(currency.subunit_ratio_decimal())
            .ok_or_else(|| MoneyError::validation(format!("Amount {amount} is out of range")))?;
        Ok(Self::new(fractional, currency))
    }

    /// Creates money from a floating-point subunit count.
    ///
    /// # Errors
    ///
    /// Returns a validation error for NaN, infinities and out-of-range values.
    pub fn try_from_f64(fractional: f64, currency: Currency) -> MoneyResult<Self> {
        if !fractional.is_finite() {
            return Err(MoneyError::validation(format!(
                "Must be initialized with a finite value, got {fractional}"
            )));
        }
        let fractional = Decimal::from_f64(fractional).ok_or_else(|| {
            MoneyError::validation(format!("Value {fractional} is out of range"))
        })?;
        Ok(Self::new(fractional, currency))
    }

    /// Zero in `currency`.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Same bank, new magnitude and currency. Every derived value goes
    /// through here so it keeps the receiver's bank.
    pub(crate) fn rebuild(&self, fractional: Decimal, currency: Currency) -> Self {
        Self::with_bank(fractional, currency, Arc::clone(&self.bank))
    }

    fn narrow(fractional: Decimal) -> Decimal {
        if context::infinite_precision() {
            fractional
        } else {
            rounding::rounding_mode().apply(fractional, 0)
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Magnitude in subunits.
    #[must_use]
    pub const fn fractional(&self) -> Decimal {
        self.fractional
    }

    /// Magnitude in major units.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.fractional / self.currency.subunit_ratio_decimal()
    }

    /// Currency of this value.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Bank used for conversions.
    #[must_use]
    pub const fn bank(&self) -> &Arc<dyn Bank> {
        &self.bank
    }

    /// Same magnitude relabelled as `currency`, without conversion.
    #[must_use]
    pub fn with_currency(&self, currency: Currency) -> Self {
        if currency == self.currency {
            return self.clone();
        }
        self.rebuild(self.fractional, currency)
    }

    /// Same value bound to another bank.
    #[must_use]
    pub fn bound_to(&self, bank: Arc<dyn Bank>) -> Self {
        Self::with_bank(self.fractional, self.currency, bank)
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Rounds the magnitude to `places` decimal places of a subunit.
    ///
    /// Only meaningful under infinite precision; otherwise magnitudes are
    /// already whole.
    #[must_use]
    pub fn round_to(&self, mode: RoundingMode, places: u32) -> Self {
        self.rebuild(mode.apply(self.fractional, places), self.currency)
    }

    /// Rounds to the currency's smallest cash denomination.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::UndefinedDenomination`] when the currency has no
    /// smallest denomination.
    pub fn round_to_nearest_cash_value(&self) -> MoneyResult<Self> {
        let smallest = self
            .currency
            .smallest_denomination()
            .map(Decimal::from)
            .ok_or_else(|| MoneyError::UndefinedDenomination(self.currency.code().to_string()))?;

        let steps = rounding::rounding_mode().apply(self.fractional / smallest, 0);
        Ok(self.rebuild(steps * smallest, self.currency))
    }

    // ========================================================================
    // Exchange
    // ========================================================================

    /// Converts into `currency` through the bound bank.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::UnknownRate`] or
    /// [`MoneyError::DifferentCurrency`] when the bank cannot convert.
    pub fn exchange_to(&self, currency: Currency) -> MoneyResult<Self> {
        self.bank.exchange_with(self, currency, None)
    }

    /// Converts into `currency`, rounding the result with `rounding`.
    ///
    /// # Errors
    ///
    /// Same as [`exchange_to`](Self::exchange_to).
    pub fn exchange_to_with(
        &self,
        currency: Currency,
        rounding: &dyn ExchangeRounding,
    ) -> MoneyResult<Self> {
        self.bank.exchange_with(self, currency, Some(rounding))
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    /// Splits this value into parts proportional to `parts`.
    ///
    /// The parts always sum to this value. Leftover subunits go to the
    /// earliest parts.
    ///
    /// # Errors
    ///
    /// Returns a validation error for zero parts, an empty weight list or a
    /// negative weight.
    ///
    /// # Example
    ///
    /// ```
    /// use coinage_core::{Currency, Money};
    /// use rust_decimal::Decimal;
    ///
    /// let total = Money::new(10, Currency::USD);
    /// let parts = total
    ///     .allocate(vec![Decimal::ONE, Decimal::ONE, Decimal::TWO])
    ///     .unwrap();
    /// let cents: Vec<_> = parts.iter().map(Money::fractional).collect();
    /// assert_eq!(cents, [Decimal::from(3), Decimal::from(2), Decimal::from(5)]);
    /// ```
    pub fn allocate(&self, parts: impl Into<Parts>) -> MoneyResult<Vec<Self>> {
        let cutoff = if context::infinite_precision() {
            Cutoff::Exact
        } else {
            Cutoff::Whole
        };

        Ok(Allocation::allocate(self.fractional, parts, cutoff)?
            .into_iter()
            .map(|share| self.rebuild(share, self.currency))
            .collect())
    }

    /// Splits this value into `count` near-equal parts.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `count` is zero.
    pub fn split(&self, count: usize) -> MoneyResult<Vec<Self>> {
        self.allocate(Parts::Count(count))
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Orders two values, converting `other` when currencies differ.
    ///
    /// Zero compares against anything without conversion.
    ///
    /// # Errors
    ///
    /// Propagates the bank's error when conversion is needed and fails.
    pub fn compare(&self, other: &Self) -> MoneyResult<Ordering> {
        if self.is_zero() || other.is_zero() || self.currency == other.currency {
            return Ok(self.fractional.cmp(&other.fractional));
        }
        let other = other.exchange_to(self.currency)?;
        Ok(self.fractional.cmp(&other.fractional))
    }

    /// Orders this value against a plain number.
    ///
    /// # Errors
    ///
    /// Returns a type error for any non-zero number, which carries no
    /// currency to compare against.
    pub fn compare_number(&self, number: impl Into<Decimal>) -> MoneyResult<Ordering> {
        let number = number.into();
        if !number.is_zero() {
            return Err(MoneyError::type_error(format!(
                "Can't compare {self} with the plain number {number}"
            )));
        }
        Ok(self.fractional.cmp(&Decimal::ZERO))
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Money")
            .field("fractional", &self.fractional)
            .field("currency", &self.currency)
            .finish_non_exhaustive()
    }
}

/// Renders `"<amount> <CODE>"`, e.g. `"10.50 USD"`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let places = self.currency.decimal_places() as usize;
        write!(f, "{:.places$} {}", self.amount(), self.currency)
    }
}

/// Equal when currencies and magnitudes match, or when both are zero.
impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        if self.is_zero() && other.is_zero() {
            return true;
        }
        self.currency == other.currency && self.fractional == other.fractional
    }
}

/// Defined for same-currency values and whenever one side is zero.
///
/// Use [`Money::compare`] to order values in different currencies.
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency || self.is_zero() || other.is_zero() {
            Some(self.fractional.cmp(&other.fractional))
        } else {
            None
        }
    }
}
