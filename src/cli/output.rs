//! Output formatting shared by the CLI commands.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;
use zonedit::models::{LayoutRef, LayoutType};
use zonedit::services::ShortcutDisplayEntry;
use zonedit::SettingsModel;

/// JSON-serializable layout summary
#[derive(Serialize, Debug)]
pub struct LayoutOutput {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    pub zone_count: u32,
    pub zones: usize,
    pub selected: bool,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<u8>,
}

impl From<&LayoutRef> for LayoutOutput {
    fn from(layout: &LayoutRef) -> Self {
        let model = layout.model();
        Self {
            id: model.id,
            name: model.name.clone(),
            layout_type: model.layout_type,
            zone_count: model.zone_count,
            zones: model.zones.len(),
            selected: model.is_selected,
            applied: model.is_applied,
            shortcut: model.shortcut.as_digit(),
        }
    }
}

/// JSON-serializable model state
#[derive(Serialize, Debug)]
pub struct ModelOutput {
    pub templates: Vec<LayoutOutput>,
    pub custom_layouts: Vec<LayoutOutput>,
    pub shortcuts: Vec<ShortcutDisplayEntry>,
    pub selected: Option<Uuid>,
    pub applied: Option<Uuid>,
}

impl ModelOutput {
    pub fn capture(model: &SettingsModel) -> Self {
        let summarize =
            |layouts: Vec<LayoutRef>| layouts.iter().map(LayoutOutput::from).collect::<Vec<_>>();

        Self {
            templates: summarize(model.templates().snapshot()),
            custom_layouts: summarize(model.custom_layouts().snapshot()),
            shortcuts: model.shortcut_display().snapshot(),
            selected: model.selected().map(|l| l.id()),
            applied: model.applied().map(|l| l.id()),
        }
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output to JSON")?;
    println!("{json}");
    Ok(())
}

/// Prints one layout per line: selection marker, name, type and zone count.
pub fn print_layouts(title: &str, layouts: &[LayoutOutput]) {
    println!("{title}:");
    if layouts.is_empty() {
        println!("  (none)");
    }
    for layout in layouts {
        let marker = match (layout.selected, layout.applied) {
            (_, true) => '*',
            (true, false) => '>',
            _ => ' ',
        };
        let shortcut = layout
            .shortcut
            .map(|digit| format!(" [{digit}]"))
            .unwrap_or_default();
        println!(
            "  {marker} {} ({}, {} zones){shortcut}",
            layout.name, layout.layout_type, layout.zone_count
        );
    }
    println!();
}
