//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;
use uuid::Uuid;
use zonedit::config::Config;
use zonedit::models::{LayoutEntry, LayoutModel, LayoutRef, ShortcutKey, Zone};
use zonedit::services::UniformZoneEngine;
use zonedit::{Property, SettingsModel};

/// Fixed ids so CLI output can be asserted on.
pub const CODING_ID: &str = "6d7e2a40-3b36-4c6a-9d62-1d7b50d0f001";
pub const WRITING_ID: &str = "6d7e2a40-3b36-4c6a-9d62-1d7b50d0f002";
pub const GAMING_ID: &str = "6d7e2a40-3b36-4c6a-9d62-1d7b50d0f003";

/// A settings model with default config and initialized templates.
pub fn test_model() -> SettingsModel {
    let model = SettingsModel::new(&Config::new());
    model
        .init_templates(&UniformZoneEngine)
        .expect("default templates should initialize");
    model
}

/// A custom layout with a random id and two half-screen zones.
pub fn custom_layout(name: &str) -> LayoutRef {
    custom_layout_with_id(Uuid::new_v4(), name)
}

pub fn custom_layout_with_id(id: Uuid, name: &str) -> LayoutRef {
    let zones = vec![
        Zone::new(0, 0, 5000, 10_000),
        Zone::new(5000, 0, 5000, 10_000),
    ];
    LayoutEntry::new(LayoutModel::custom(id, name, zones).expect("valid custom layout"))
}

pub fn digit(d: u8) -> ShortcutKey {
    ShortcutKey::digit(d).expect("digit 0-9")
}

/// Names of the model's custom layouts, in list order.
pub fn custom_names(model: &SettingsModel) -> Vec<String> {
    model
        .custom_layouts()
        .snapshot()
        .iter()
        .map(|layout| layout.name())
        .collect()
}

/// Labels of the model's shortcut display list, in order.
pub fn display_labels(model: &SettingsModel) -> Vec<String> {
    model
        .shortcut_display()
        .snapshot()
        .into_iter()
        .map(|entry| entry.label)
        .collect()
}

/// Records every property notification the model publishes.
pub fn record_properties(model: &SettingsModel) -> Rc<RefCell<Vec<Property>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    model
        .property_changed()
        .subscribe(move |property| sink.borrow_mut().push(*property));
    log
}

/// Snapshot JSON with three custom layouts, one hotkey list and an applied
/// columns layout with four zones.
pub fn snapshot_json() -> String {
    format!(
        r#"{{
    "custom-layouts": [
        {{ "uuid": "{CODING_ID}", "name": "Coding", "quick-key": 3 }},
        {{ "uuid": "{WRITING_ID}", "name": "Writing" }},
        {{ "uuid": "{GAMING_ID}", "name": "Gaming", "quick-key": 1 }}
    ],
    "applied-layout": {{ "type": "columns", "zone-count": 4, "spacing": 8 }}
}}"#
    )
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Temp directory holding a snapshot file.
pub fn temp_snapshot(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_file(temp_dir.path(), "snapshot.json", content);
    (temp_dir, path)
}
