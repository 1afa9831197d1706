//! Snapshot inspection command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use zonedit::config::Config;
use zonedit::services::{EditorSnapshot, UniformZoneEngine};
use zonedit::SettingsModel;

use super::output::{print_json, print_layouts, ModelOutput};

/// Load an editor snapshot and show the resulting model state
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the snapshot JSON file
    #[arg(value_name = "SNAPSHOT")]
    snapshot: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl ShowArgs {
    /// Execute show command
    pub fn execute(&self, config: &Config) -> Result<()> {
        let snapshot = EditorSnapshot::load(&self.snapshot)?;

        let model = SettingsModel::new(config);
        model.init_templates(&UniformZoneEngine)?;
        let resolved = snapshot.apply_to(&model, &UniformZoneEngine)?;

        let output = ModelOutput::capture(&model);
        if self.json {
            return print_json(&output);
        }

        print_layouts("Templates", &output.templates);
        print_layouts("Custom layouts", &output.custom_layouts);

        println!("Shortcuts:");
        for entry in &output.shortcuts {
            println!("  {}", entry.label);
        }
        println!();

        match resolved {
            Some(layout) => println!("Applied: {}", layout.name()),
            None if snapshot.applied_layout.is_some() => {
                println!("Applied: (not found)");
            }
            None => println!("Applied: (none)"),
        }

        Ok(())
    }
}
