//! Loss-free partitioning of an amount into weighted shares.
//!
//! The engine works on bare `Decimal` magnitudes; [`crate::Money::allocate`]
//! wraps it for currency-tagged values.

mod engine;

#[cfg(test)]
mod props;

pub use engine::{Allocation, Cutoff, Parts};
