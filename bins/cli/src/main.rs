//! Coinage CLI - exact money arithmetic from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Convert 10.00 USD to EUR
//! coinage --rate USD:EUR:0.92 convert 10 USD EUR
//!
//! # Split 100.00 EUR three ways
//! coinage split 100 EUR 3
//!
//! # Allocate 10.00 USD by weights 1:1:2
//! coinage allocate 10 USD 1 1 2
//!
//! # Save rates for later runs
//! coinage --rate USD:EUR:0.92 export --output rates.json
//! ```

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use coinage_core::context;
use coinage_shared::MoneyConfig;

mod cli;
mod session;

use cli::{Cli, Commands};
use session::Session;

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "coinage=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so command output stays pipeable
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = MoneyConfig::load().context("Failed to load configuration")?;
    context::configure(&config, None).context("Invalid money configuration")?;

    let session = Session::new(config.conversion);
    if let Some(path) = &config.rates_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rates file {}", path.display()))?;
        session.seed(&text)?;
    }
    session.add_rates(&cli.rates)?;

    match cli.command {
        Commands::Convert { amount, from, to } => {
            println!("{}", session.convert(amount, from, to)?);
        }
        Commands::Split {
            amount,
            currency,
            parts,
        } => {
            for share in session.split(amount, currency, parts)? {
                println!("{share}");
            }
        }
        Commands::Allocate {
            amount,
            currency,
            weights,
        } => {
            for share in session.allocate(amount, currency, weights)? {
                println!("{share}");
            }
        }
        Commands::Export { output } => {
            let json = session.export(output.as_deref())?;
            if output.is_none() {
                println!("{json}");
            }
        }
        Commands::Import { file } => {
            let rates = session.import(&file)?;
            info!(rates = rates.len(), "Rates imported");
            for rate in rates {
                println!("{} -> {}: {}", rate.from_currency, rate.to_currency, rate.rate);
            }
        }
    }

    Ok(())
}
