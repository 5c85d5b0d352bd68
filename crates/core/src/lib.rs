//! Core money logic for Coinage.
//!
//! This crate contains pure money logic with ZERO file or network dependencies.
//! Values, arithmetic, allocation and exchange all live here.
//!
//! # Modules
//!
//! - `money` - Currency-tagged values and their arithmetic
//! - `allocation` - Loss-free partitioning into weighted shares
//! - `exchange` - Rate stores and banks
//! - `rounding` - Rounding modes and the scoped rounding context
//! - `context` - Process defaults with thread-scoped overrides

pub mod allocation;
pub mod context;
pub mod exchange;
pub mod money;
pub mod rounding;

pub use coinage_shared::{Currency, MoneyError, MoneyResult};
pub use exchange::{
    Bank, ExchangeRate, ExchangeRounding, MemoryRateStore, RateSnapshot, RateStore,
    SingleCurrencyBank, SnapshotFormat, VariableExchangeBank,
};
pub use money::{Coerced, Monetary, Money, Operand, Quotient};
pub use rounding::{RoundingMode, rounding_mode, with_rounding_mode};
