//! Fractal Respect Command Line Interface
//!
//! Operates an issuance instance persisted as a JSON snapshot on disk.

mod cli;
mod commands;
mod settings;
mod state;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::settings::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;
    init_logging(&config)?;

    let output = commands::run(cli, &config)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(config: &CliConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    if config.log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
