//! Subtype-preserving money operations.

use coinage_shared::{Currency, MoneyResult};

use super::value::Money;
use crate::allocation::Parts;

/// A type that wraps [`Money`] and wants to stay itself through derived
/// values.
///
/// Implementors supply the conversions; allocation and exchange come for
/// free and return `Self` rather than plain `Money`.
///
/// # Example
///
/// ```
/// use coinage_core::{Currency, Monetary, Money};
///
/// #[derive(Debug)]
/// struct Price(Money);
///
/// impl Monetary for Price {
///     fn from_money(money: Money) -> Self {
///         Price(money)
///     }
///
///     fn as_money(&self) -> &Money {
///         &self.0
///     }
/// }
///
/// let shares: Vec<Price> = Price(Money::new(100, Currency::USD)).split(3).unwrap();
/// assert_eq!(shares.len(), 3);
/// ```
pub trait Monetary: Sized {
    /// Wraps a derived value.
    fn from_money(money: Money) -> Self;

    /// The wrapped value.
    fn as_money(&self) -> &Money;

    /// See [`Money::allocate`].
    ///
    /// # Errors
    ///
    /// Same as [`Money::allocate`].
    fn allocate(&self, parts: impl Into<Parts>) -> MoneyResult<Vec<Self>> {
        Ok(self
            .as_money()
            .allocate(parts)?
            .into_iter()
            .map(Self::from_money)
            .collect())
    }

    /// See [`Money::split`].
    ///
    /// # Errors
    ///
    /// Same as [`Money::split`].
    fn split(&self, count: usize) -> MoneyResult<Vec<Self>> {
        self.allocate(Parts::Count(count))
    }

    /// See [`Money::exchange_to`].
    ///
    /// # Errors
    ///
    /// Same as [`Money::exchange_to`].
    fn exchange_to(&self, currency: Currency) -> MoneyResult<Self> {
        self.as_money().exchange_to(currency).map(Self::from_money)
    }
}

impl Monetary for Money {
    fn from_money(money: Money) -> Self {
        money
    }

    fn as_money(&self) -> &Money {
        self
    }
}
