//! CLI command handlers for zonedit.
//!
//! This module provides headless, scriptable access to the settings model
//! for automation and testing.

pub mod config;
pub mod output;
pub mod show;
pub mod templates;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zonedit::config::Config;

pub use config::ConfigArgs;
pub use show::ShowArgs;
pub use templates::TemplatesArgs;

/// Zone Layout Editor - inspect layout templates, custom layouts and shortcuts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in layout templates
    Templates(TemplatesArgs),
    /// Load an editor snapshot and show the resulting model state
    Show(ShowArgs),
    /// Display the effective configuration
    Config(ConfigArgs),
}

impl Cli {
    /// Loads the configuration this invocation should use.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    /// Execute the selected subcommand
    pub fn execute(&self, config: &Config) -> Result<()> {
        match &self.command {
            Command::Templates(args) => args.execute(config),
            Command::Show(args) => args.execute(config),
            Command::Config(args) => args.execute(config, self.config.as_deref()),
        }
    }
}
