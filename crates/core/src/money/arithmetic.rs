//! Money arithmetic.
//!
//! Fallible operations are `checked_*` methods taking any
//! `Into<Operand>`. Cross-currency operands are converted into the
//! receiver's currency through its bank first.

use std::ops::{Mul, Neg};

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;

use super::operand::{Coerced, Operand, Quotient};
use super::value::Money;

fn overflow(op: &str) -> MoneyError {
    MoneyError::validation(format!("Arithmetic overflow in {op}"))
}

fn divided_by_zero() -> MoneyError {
    MoneyError::validation("Divided by zero")
}

/// Floor division and modulo: the remainder takes the divisor's sign.
fn floor_divmod(dividend: Decimal, divisor: Decimal) -> MoneyResult<(Decimal, Decimal)> {
    if divisor.is_zero() {
        return Err(divided_by_zero());
    }
    let mut remainder = dividend.checked_rem(divisor).ok_or_else(|| overflow("modulo"))?;
    if !remainder.is_zero() && remainder.is_sign_negative() != divisor.is_sign_negative() {
        remainder = remainder
            .checked_add(divisor)
            .ok_or_else(|| overflow("modulo"))?;
    }
    let quotient = dividend
        .checked_sub(remainder)
        .and_then(|whole| whole.checked_div(divisor))
        .ok_or_else(|| overflow("division"))?
        .round();
    Ok((quotient, remainder))
}

impl Money {
    /// Converts a money operand into this value's currency.
    fn align(&self, other: &Money) -> MoneyResult<Money> {
        if other.currency() == self.currency() {
            Ok(other.clone())
        } else {
            other.exchange_to(self.currency())
        }
    }

    /// `self + rhs`.
    ///
    /// # Errors
    ///
    /// Returns a type error for a non-zero plain number and the bank's error
    /// when a money operand cannot be converted.
    pub fn checked_add(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        match rhs {
            Operand::Money(other) => {
                let other = self.align(&other)?;
                let sum = self
                    .fractional()
                    .checked_add(other.fractional())
                    .ok_or_else(|| overflow("addition"))?;
                Ok(self.rebuild(sum, self.currency()))
            }
            Operand::Number(number) => Err(MoneyError::type_error(format!(
                "Can't add the plain number {number} to {self}"
            ))),
        }
    }

    /// `self - rhs`.
    ///
    /// # Errors
    ///
    /// Same as [`checked_add`](Self::checked_add).
    pub fn checked_sub(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Ok(self.clone());
        }
        match rhs {
            Operand::Money(other) => {
                let other = self.align(&other)?;
                let difference = self
                    .fractional()
                    .checked_sub(other.fractional())
                    .ok_or_else(|| overflow("subtraction"))?;
                Ok(self.rebuild(difference, self.currency()))
            }
            Operand::Number(number) => Err(MoneyError::type_error(format!(
                "Can't subtract the plain number {number} from {self}"
            ))),
        }
    }

    /// `self * rhs` for a plain number.
    ///
    /// # Errors
    ///
    /// Returns a type error when `rhs` is money: multiplying dollars by
    /// dollars is undefined.
    pub fn checked_mul(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        match rhs.into() {
            Operand::Number(factor) => {
                let product = self
                    .fractional()
                    .checked_mul(factor)
                    .ok_or_else(|| overflow("multiplication"))?;
                Ok(self.rebuild(product, self.currency()))
            }
            Operand::Money(other) => Err(MoneyError::type_error(format!(
                "Can't multiply {self} by {other}"
            ))),
        }
    }

    /// `self / rhs`.
    ///
    /// Dividing by a number yields money; dividing by money yields a ratio,
    /// converting the divisor first when currencies differ.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero divisor and the bank's error
    /// when the divisor cannot be converted.
    pub fn checked_div(&self, rhs: impl Into<Operand>) -> MoneyResult<Quotient> {
        match rhs.into() {
            Operand::Number(divisor) => {
                if divisor.is_zero() {
                    return Err(divided_by_zero());
                }
                let quotient = self
                    .fractional()
                    .checked_div(divisor)
                    .ok_or_else(|| overflow("division"))?;
                Ok(Quotient::Money(self.rebuild(quotient, self.currency())))
            }
            Operand::Money(other) => {
                let other = self.align(&other)?;
                if other.is_zero() {
                    return Err(divided_by_zero());
                }
                let ratio = self
                    .fractional()
                    .checked_div(other.fractional())
                    .ok_or_else(|| overflow("division"))?;
                Ok(Quotient::Ratio(ratio))
            }
        }
    }

    /// Floor division with remainder.
    ///
    /// By money: `(Quotient::Ratio(whole count), remainder)`.
    /// By a number: `(Quotient::Money(quotient), remainder)`.
    ///
    /// # Errors
    ///
    /// Same as [`checked_div`](Self::checked_div).
    pub fn divmod(&self, rhs: impl Into<Operand>) -> MoneyResult<(Quotient, Money)> {
        match rhs.into() {
            Operand::Number(divisor) => {
                let (quotient, remainder) = floor_divmod(self.fractional(), divisor)?;
                Ok((
                    Quotient::Money(self.rebuild(quotient, self.currency())),
                    self.rebuild(remainder, self.currency()),
                ))
            }
            Operand::Money(other) => {
                let other = self.align(&other)?;
                let (quotient, remainder) = floor_divmod(self.fractional(), other.fractional())?;
                Ok((
                    Quotient::Ratio(quotient),
                    self.rebuild(remainder, self.currency()),
                ))
            }
        }
    }

    /// Floor modulo; the result takes the divisor's sign.
    ///
    /// # Errors
    ///
    /// Same as [`checked_div`](Self::checked_div).
    pub fn modulo(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        self.divmod(rhs).map(|(_, remainder)| remainder)
    }

    /// Truncated remainder; the result takes this value's sign.
    ///
    /// # Errors
    ///
    /// Same as [`checked_div`](Self::checked_div).
    pub fn remainder(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let divisor = match rhs.into() {
            Operand::Number(divisor) => divisor,
            Operand::Money(other) => self.align(&other)?.fractional(),
        };
        if divisor.is_zero() {
            return Err(divided_by_zero());
        }
        let remainder = self
            .fractional()
            .checked_rem(divisor)
            .ok_or_else(|| overflow("remainder"))?;
        Ok(self.rebuild(remainder, self.currency()))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Money {
        self.rebuild(self.fractional().abs(), self.currency())
    }

    /// True when the magnitude is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.fractional().is_zero()
    }

    /// True when the magnitude is not zero.
    #[must_use]
    pub fn is_nonzero(&self) -> bool {
        !self.is_zero()
    }

    /// True when the magnitude is above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.fractional() > Decimal::ZERO
    }

    /// True when the magnitude is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.fractional() < Decimal::ZERO
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Money {
        self.rebuild(-self.fractional(), self.currency())
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        -&self
    }
}

/// `price * 2`.
///
/// # Panics
///
/// Panics when the product overflows, like the integer operators. Use
/// [`Money::checked_mul`] to get an error instead.
impl Mul<Decimal> for &Money {
    type Output = Money;

    fn mul(self, rhs: Decimal) -> Money {
        match self.checked_mul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, rhs: Decimal) -> Money {
        &self * rhs
    }
}

/// `2 * price`, routed through [`Coerced`](super::Coerced).
///
/// # Panics
///
/// Panics when the product overflows.
impl Mul<&Money> for Decimal {
    type Output = Money;

    fn mul(self, rhs: &Money) -> Money {
        match Coerced(self).checked_mul(rhs) {
            Ok(product) => product,
            Err(err) => panic!("{err}"),
        }
    }
}

impl Mul<Money> for Decimal {
    type Output = Money;

    fn mul(self, rhs: Money) -> Money {
        self * &rhs
    }
}
