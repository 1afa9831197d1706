//! Template listing command.

use anyhow::Result;
use clap::Args;
use zonedit::config::Config;
use zonedit::services::UniformZoneEngine;
use zonedit::SettingsModel;

use super::output::{print_json, print_layouts, LayoutOutput};

/// List the built-in layout templates
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl TemplatesArgs {
    /// Execute templates command
    pub fn execute(&self, config: &Config) -> Result<()> {
        let model = SettingsModel::new(config);
        model.init_templates(&UniformZoneEngine)?;

        let templates: Vec<LayoutOutput> = model
            .templates()
            .snapshot()
            .iter()
            .map(LayoutOutput::from)
            .collect();

        if self.json {
            print_json(&templates)
        } else {
            print_layouts("Templates", &templates);
            Ok(())
        }
    }
}
