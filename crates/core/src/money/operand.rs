//! Operands accepted by money arithmetic.

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;

use super::value::Money;

/// Right-hand side of a money operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Another money value.
    Money(Money),
    /// A plain number with no currency.
    Number(Decimal),
}

impl Operand {
    /// True when the operand is exactly zero, whatever its kind.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Money(money) => money.is_zero(),
            Self::Number(number) => number.is_zero(),
        }
    }
}

impl From<Money> for Operand {
    fn from(money: Money) -> Self {
        Self::Money(money)
    }
}

impl From<&Money> for Operand {
    fn from(money: &Money) -> Self {
        Self::Money(money.clone())
    }
}

impl From<Coerced> for Operand {
    fn from(coerced: Coerced) -> Self {
        Self::Number(coerced.0)
    }
}

macro_rules! number_operand {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Operand {
                fn from(number: $ty) -> Self {
                    Self::Number(Decimal::from(number))
                }
            }
        )+
    };
}

number_operand!(Decimal, i32, i64, u32, u64, usize);

/// A plain number standing on the left of a money operation (`2 * price`).
///
/// Only multiplication is defined. Adding or subtracting is accepted for an
/// exact zero, which carries no currency; anything else is a type error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coerced(pub Decimal);

impl Coerced {
    /// `number + money`.
    ///
    /// # Errors
    ///
    /// Returns a type error unless the number is zero.
    pub fn checked_add(self, rhs: &Money) -> MoneyResult<Money> {
        if self.0.is_zero() {
            return Ok(rhs.clone());
        }
        Err(MoneyError::type_error(format!(
            "Can't add the plain number {} to {rhs}",
            self.0
        )))
    }

    /// `number - money`.
    ///
    /// # Errors
    ///
    /// Returns a type error unless the number is zero.
    pub fn checked_sub(self, rhs: &Money) -> MoneyResult<Money> {
        if self.0.is_zero() {
            return Ok(-rhs);
        }
        Err(MoneyError::type_error(format!(
            "Can't subtract {rhs} from the plain number {}",
            self.0
        )))
    }

    /// `number * money`.
    ///
    /// # Errors
    ///
    /// Returns a validation error on overflow.
    pub fn checked_mul(self, rhs: &Money) -> MoneyResult<Money> {
        rhs.checked_mul(self)
    }

    /// `number / money` has no meaning.
    ///
    /// # Errors
    ///
    /// Always returns a type error.
    pub fn checked_div(self, rhs: &Money) -> MoneyResult<Money> {
        Err(MoneyError::type_error(format!(
            "Can't divide the plain number {} by {rhs}",
            self.0
        )))
    }
}

/// Result of dividing money.
#[derive(Debug, Clone, PartialEq)]
pub enum Quotient {
    /// Money divided by a number.
    Money(Money),
    /// Money divided by money: a dimensionless ratio.
    Ratio(Decimal),
}

impl Quotient {
    /// The money result, if this was a division by a number.
    #[must_use]
    pub fn into_money(self) -> Option<Money> {
        match self {
            Self::Money(money) => Some(money),
            Self::Ratio(_) => None,
        }
    }

    /// The ratio, if this was a division by money.
    #[must_use]
    pub fn into_ratio(self) -> Option<Decimal> {
        match self {
            Self::Ratio(ratio) => Some(ratio),
            Self::Money(_) => None,
        }
    }
}
