//! Exchange rates, rate stores, and banks.
//!
//! - `rate` - Directed exchange rate records and rate keys
//! - `store` - Thread-safe rate storage
//! - `snapshot` - Rate export and import
//! - `bank` - The `Bank` trait and rounding strategies
//! - `variable` - Bank converting through a rate store
//! - `single` - Bank that refuses to convert

pub mod bank;
pub mod rate;
pub mod single;
pub mod snapshot;
pub mod store;
pub mod variable;

#[cfg(test)]
mod props;

pub use bank::{Bank, ExchangeRounding};
pub use rate::{ExchangeRate, rate_key};
pub use single::SingleCurrencyBank;
pub use snapshot::{RateSnapshot, SnapshotFormat};
pub use store::{MemoryRateStore, RateIter, RateStore, RateTable};
pub use variable::VariableExchangeBank;
