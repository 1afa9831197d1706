//! Zone Layout Editor - command-line front end for the settings model
//!
//! Loads configuration and an optional editor snapshot, builds the settings
//! model and prints its state.

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zonedit::config::Config;

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let config = cli.load_config()?;
    init_logging(&config, cli.verbose);

    cli.execute(&config)
}
