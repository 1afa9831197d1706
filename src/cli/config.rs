//! Configuration display command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::{Path, PathBuf};
use zonedit::config::Config;
use zonedit::constants::APP_NAME;

use super::output::print_json;

/// Display the effective configuration
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    path: Option<PathBuf>,
    exists: bool,
    #[serde(flatten)]
    config: &'a Config,
}

impl ConfigArgs {
    /// Execute config command
    pub fn execute(&self, config: &Config, explicit_path: Option<&Path>) -> Result<()> {
        let path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Config::config_file_path().ok(),
        };
        let exists = path.as_ref().is_some_and(|p| p.exists());

        if self.json {
            return print_json(&ConfigOutput {
                path,
                exists,
                config,
            });
        }

        let title = format!("{APP_NAME} Configuration");
        println!("{title}");
        println!("{}", "=".repeat(title.len()));
        println!();

        match &path {
            Some(path) if exists => println!("File: {}", path.display()),
            Some(path) => println!("File: {} (not found, using defaults)", path.display()),
            None => println!("File: (unavailable, using defaults)"),
        }
        println!();

        println!("Templates:");
        println!("  Zone count: {}", config.templates.zone_count);
        println!("  Spacing: {}", config.templates.spacing);
        println!("  Show spacing: {}", config.templates.show_spacing);
        println!("  Sensitivity radius: {}", config.templates.sensitivity_radius);
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);

        Ok(())
    }
}
