//! The bank and rates a single CLI invocation works with.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use coinage_core::{
    Bank, Currency, ExchangeRate, Money, SingleCurrencyBank, SnapshotFormat, VariableExchangeBank,
};
use coinage_shared::config::ConversionPolicy;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::cli::RateArg;

/// Rates and the bank money is bound to for one run.
pub struct Session {
    rates: Arc<VariableExchangeBank>,
    bank: Arc<dyn Bank>,
    policy: ConversionPolicy,
}

impl Session {
    /// Creates a session with an empty rate table.
    pub fn new(policy: ConversionPolicy) -> Self {
        let rates = Arc::new(VariableExchangeBank::new());
        let bank: Arc<dyn Bank> = match policy {
            ConversionPolicy::Variable => Arc::clone(&rates) as Arc<dyn Bank>,
            ConversionPolicy::Disabled => Arc::new(SingleCurrencyBank),
        };
        Self { rates, bank, policy }
    }

    /// Loads a JSON rate snapshot.
    pub fn seed(&self, text: &str) -> Result<usize> {
        let loaded = self
            .rates
            .import_rates(SnapshotFormat::Json, text)
            .context("Failed to load rate snapshot")?;
        info!(loaded, "Exchange rates seeded");
        Ok(loaded)
    }

    /// Registers rates passed with `--rate`.
    ///
    /// Rates are still recorded when conversion is disabled, so they show up
    /// in `export`, but no conversion uses them.
    pub fn add_rates(&self, rates: &[RateArg]) -> Result<()> {
        if self.policy == ConversionPolicy::Disabled && !rates.is_empty() {
            warn!(
                count = rates.len(),
                "Currency conversion is disabled, --rate values are unused"
            );
        }
        for arg in rates {
            self.rates
                .add_rate(arg.from, arg.to, arg.rate)
                .with_context(|| format!("Invalid rate {}:{}:{}", arg.from, arg.to, arg.rate))?;
        }
        Ok(())
    }

    fn money(&self, amount: Decimal, currency: Currency) -> Result<Money> {
        Ok(Money::from_amount(amount, currency)?.bound_to(Arc::clone(&self.bank)))
    }

    /// `amount` of `from` expressed in `to`.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Money> {
        let money = self.money(amount, from)?;
        money
            .exchange_to(to)
            .with_context(|| format!("Cannot convert {money} to {to}"))
    }

    /// `amount` split into `parts` near-equal shares.
    pub fn split(&self, amount: Decimal, currency: Currency, parts: usize) -> Result<Vec<Money>> {
        Ok(self.money(amount, currency)?.split(parts)?)
    }

    /// `amount` split proportionally to `weights`.
    pub fn allocate(
        &self,
        amount: Decimal,
        currency: Currency,
        weights: Vec<Decimal>,
    ) -> Result<Vec<Money>> {
        Ok(self.money(amount, currency)?.allocate(weights)?)
    }

    /// Serializes the rate table, writing it to `output` when given.
    pub fn export(&self, output: Option<&Path>) -> Result<String> {
        let json = self.rates.export_rates(SnapshotFormat::Json)?;
        if let Some(path) = output {
            fs::write(path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), rates = self.rates.each_rate().len(), "Rates exported");
        }
        Ok(json)
    }

    /// Loads a snapshot file and returns the rates now known.
    pub fn import(&self, file: &Path) -> Result<Vec<ExchangeRate>> {
        let text = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        self.seed(&text)?;
        Ok(self.rates.rates())
    }
}
