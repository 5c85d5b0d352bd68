//! CLI argument definitions.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use coinage_core::{Currency, MoneyError};
use rust_decimal::Decimal;

/// Coinage - exact money arithmetic from the command line
#[derive(Parser)]
#[command(name = "coinage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Exchange rate to register before running, as FROM:TO:RATE (repeatable)
    #[arg(long = "rate", value_name = "FROM:TO:RATE", global = true)]
    pub rates: Vec<RateArg>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert an amount between currencies
    Convert {
        /// Amount in major units (e.g. 10.50)
        amount: Decimal,
        /// Source currency code
        from: Currency,
        /// Target currency code
        to: Currency,
    },

    /// Split an amount into near-equal parts
    Split {
        /// Amount in major units
        amount: Decimal,
        /// Currency code
        currency: Currency,
        /// Number of parts
        parts: usize,
    },

    /// Allocate an amount proportionally to weights
    Allocate {
        /// Amount in major units
        amount: Decimal,
        /// Currency code
        currency: Currency,
        /// One weight per party
        #[arg(required = true, num_args = 1..)]
        weights: Vec<Decimal>,
    },

    /// Print or save the known exchange rates as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load exchange rates from a JSON snapshot and print them
    Import {
        /// Snapshot file
        file: PathBuf,
    },
}

/// A `--rate FROM:TO:RATE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateArg {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}

impl FromStr for RateArg {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split(':');
        let (Some(from), Some(to), Some(rate), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(MoneyError::validation(format!(
                "Expected FROM:TO:RATE, got '{s}'"
            )));
        };

        let rate = rate
            .trim()
            .parse::<Decimal>()
            .map_err(|e| MoneyError::validation(format!("Invalid rate '{rate}': {e}")))?;

        Ok(Self {
            from: Currency::wrap(from.trim())?,
            to: Currency::wrap(to.trim())?,
            rate,
        })
    }
}
