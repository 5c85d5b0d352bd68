//! Currency-tagged money values.
//!
//! - [`Money`]: immutable magnitude in subunits, a currency and a bank
//! - [`Operand`] / [`Coerced`] / [`Quotient`]: arithmetic operands and results
//! - [`Monetary`]: newtypes over `Money` that keep their type through
//!   allocation and exchange

mod arithmetic;
mod monetary;
mod operand;
mod value;

#[cfg(test)]
mod props;

pub use monetary::Monetary;
pub use operand::{Coerced, Operand, Quotient};
pub use value::Money;
