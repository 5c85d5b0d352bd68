//! Money configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Process-wide money settings.
///
/// Loaded once at start-up and applied to the core's process defaults.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MoneyConfig {
    /// Currency used when none is given explicitly.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Rounding rule name (e.g. `half_up`, `half_even`, `down`).
    #[serde(default = "default_rounding_mode")]
    pub rounding_mode: String,
    /// Keep fractional subunits instead of rounding to whole subunits.
    #[serde(default)]
    pub infinite_precision: bool,
    /// Whether the default bank may convert between currencies.
    #[serde(default)]
    pub conversion: ConversionPolicy,
    /// JSON rate snapshot seeded into the default bank.
    #[serde(default)]
    pub rates_file: Option<PathBuf>,
}

/// Which bank the process uses by default.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversionPolicy {
    /// Convert through the stored exchange rates.
    #[default]
    Variable,
    /// Reject every cross-currency operation.
    Disabled,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_rounding_mode() -> String {
    "half_up".to_string()
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            rounding_mode: default_rounding_mode(),
            infinite_precision: false,
            conversion: ConversionPolicy::default(),
            rates_file: None,
        }
    }
}

impl MoneyConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `COINAGE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINAGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MoneyConfig::default();
        assert_eq!(config.default_currency, "USD");
        assert_eq!(config.rounding_mode, "half_up");
        assert!(!config.infinite_precision);
        assert_eq!(config.conversion, ConversionPolicy::Variable);
        assert!(config.rates_file.is_none());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "COINAGE__DEFAULT_CURRENCY",
                "COINAGE__ROUNDING_MODE",
                "COINAGE__INFINITE_PRECISION",
                "COINAGE__CONVERSION",
                "COINAGE__RATES_FILE",
            ],
            || {
                let config = MoneyConfig::load().unwrap();
                assert_eq!(config, MoneyConfig::default());
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("COINAGE__DEFAULT_CURRENCY", Some("EUR")),
                ("COINAGE__ROUNDING_MODE", Some("half_even")),
                ("COINAGE__INFINITE_PRECISION", Some("true")),
                ("COINAGE__CONVERSION", Some("disabled")),
                ("COINAGE__RATES_FILE", Some("rates.json")),
            ],
            || {
                let config = MoneyConfig::load().unwrap();
                assert_eq!(config.default_currency, "EUR");
                assert_eq!(config.rounding_mode, "half_even");
                assert!(config.infinite_precision);
                assert_eq!(config.conversion, ConversionPolicy::Disabled);
                assert_eq!(config.rates_file, Some(PathBuf::from("rates.json")));
            },
        );
    }
}
