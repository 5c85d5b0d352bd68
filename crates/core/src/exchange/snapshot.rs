//! Rate snapshot export and import.
//!
//! A snapshot is an ordered mapping of `"{FROM}_TO_{TO}"` keys to rates.
//! Rates are written as decimal strings so a re-import is lossless.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rate::split_rate_key;
use super::store::RateStore;

/// Interchange formats a snapshot can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// JSON object of key to rate.
    #[default]
    Json,
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for SnapshotFormat {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            _ => Err(MoneyError::validation(format!(
                "Unknown rate snapshot format '{s}'"
            ))),
        }
    }
}

/// Point-in-time copy of a store's rates.
///
/// Exported rates are JSON strings (`{"USD_TO_EUR":"1.33"}`) so no digit is
/// lost to a float parser on the way back in. Import accepts both strings
/// and JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSnapshot {
    rates: BTreeMap<String, Decimal>,
}

impl RateSnapshot {
    /// Captures every rate of `store`.
    #[must_use]
    pub fn capture(store: &dyn RateStore) -> Self {
        let rates = store.each_rate().map(|r| (r.key(), r.rate)).collect();
        Self { rates }
    }

    /// Renders the snapshot in `format`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if serialization fails.
    pub fn export(&self, format: SnapshotFormat) -> MoneyResult<String> {
        match format {
            SnapshotFormat::Json => serde_json::to_string(self).map_err(|e| {
                MoneyError::validation(format!("Failed to serialize rates: {e}"))
            }),
        }
    }

    /// Parses a snapshot written in `format`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed text or keys.
    pub fn parse(format: SnapshotFormat, text: &str) -> MoneyResult<Self> {
        let snapshot: Self = match format {
            SnapshotFormat::Json => serde_json::from_str(text)
                .map_err(|e| MoneyError::validation(format!("Malformed rate snapshot: {e}")))?,
        };

        if let Some(bad) = snapshot.rates.keys().find(|k| split_rate_key(k).is_none()) {
            return Err(MoneyError::validation(format!("Malformed rate key '{bad}'")));
        }
        Ok(snapshot)
    }

    /// Writes every rate into `store` under a single lock acquisition.
    ///
    /// Keys already in the store but absent from the snapshot are kept.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive rate.
    pub fn restore_into(&self, store: &dyn RateStore) -> MoneyResult<usize> {
        store.transaction(&mut |table| {
            for (key, rate) in &self.rates {
                let (from, to) = split_rate_key(key)
                    .ok_or_else(|| MoneyError::validation(format!("Malformed rate key '{key}'")))?;
                table.add_rate(from, to, *rate)?;
            }
            Ok(())
        })?;

        tracing::debug!(count = self.rates.len(), "Exchange rates imported");
        Ok(self.rates.len())
    }

    /// Rates keyed by normalized pair.
    #[must_use]
    pub const fn rates(&self) -> &BTreeMap<String, Decimal> {
        &self.rates
    }

    /// Number of rates in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True when the snapshot carries no rate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
