//! Editor snapshot loading.
//!
//! A snapshot is the JSON the host hands the editor at startup: the custom
//! layouts, persisted shortcut assignments and the currently applied layout.
//! This module turns it into model state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::constants::MAX_ZONE_COUNT;
use crate::models::{
    AppliedLayout, LayoutEntry, LayoutModel, LayoutRef, ShortcutKey, ShortcutMap, Zone,
};
use crate::services::ZoneEngine;
use crate::settings_model::SettingsModel;

/// A persisted custom layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CustomLayoutRecord {
    /// Layout id
    pub uuid: Uuid,
    /// Display name
    pub name: String,
    /// `-1` for none, `0`-`9` for a digit key
    #[serde(default)]
    pub quick_key: ShortcutKey,
    /// Zone geometry in basis points
    #[serde(default)]
    pub zones: Vec<Zone>,
}

/// A persisted shortcut assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HotkeyRecord {
    /// Digit key
    pub key: ShortcutKey,
    /// Layout bound to the key
    pub layout_id: Uuid,
}

/// Everything the editor needs from the host to populate its model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EditorSnapshot {
    /// User-defined layouts
    #[serde(default)]
    pub custom_layouts: Vec<CustomLayoutRecord>,
    /// Persisted shortcut assignments
    #[serde(default)]
    pub layout_hotkeys: Vec<HotkeyRecord>,
    /// Layout active on the desktop, if any
    #[serde(default)]
    pub applied_layout: Option<AppliedLayout>,
}

impl EditorSnapshot {
    /// Parses a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON or when the applied layout reports
    /// more than [`MAX_ZONE_COUNT`] zones.
    pub fn parse(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).context("Failed to parse editor snapshot")?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<()> {
        if let Some(applied) = &self.applied_layout {
            if applied.zone_count > MAX_ZONE_COUNT {
                anyhow::bail!(
                    "Applied layout zone count {} exceeds maximum of {}",
                    applied.zone_count,
                    MAX_ZONE_COUNT
                );
            }
        }
        Ok(())
    }

    /// Loads a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load snapshot from {}", path.display()))
    }

    /// Builds layout entries for every custom layout record.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids or invalid names.
    pub fn custom_layouts(&self) -> Result<Vec<LayoutRef>> {
        let mut seen = HashSet::new();

        self.custom_layouts
            .iter()
            .map(|record| {
                if !seen.insert(record.uuid) {
                    anyhow::bail!("Duplicate custom layout id {}", record.uuid);
                }

                let mut model = LayoutModel::custom(record.uuid, &record.name, record.zones.clone())
                    .with_context(|| format!("Invalid custom layout {}", record.uuid))?;
                model.shortcut = record.quick_key;
                Ok(LayoutEntry::new(model))
            })
            .collect()
    }

    /// Shortcut assignments from `layout_hotkeys`, in file order (later
    /// entries win).
    #[must_use]
    pub fn shortcut_map(&self) -> ShortcutMap {
        let mut shortcuts = ShortcutMap::new();
        for hotkey in &self.layout_hotkeys {
            shortcuts.assign(hotkey.key, hotkey.layout_id);
        }
        shortcuts
    }

    /// Populates `model` from this snapshot.
    ///
    /// Custom layouts replace the current ones, persisted hotkeys (if any)
    /// override the layouts' own quick keys, then the applied layout is used
    /// to refresh templates and resolve the selection. Returns the resolved
    /// layout.
    pub fn apply_to(&self, model: &SettingsModel, engine: &dyn ZoneEngine) -> Result<Option<LayoutRef>> {
        model.set_custom_layouts(self.custom_layouts()?);

        if !self.layout_hotkeys.is_empty() {
            model.set_shortcut_map(self.shortcut_map());
        }

        let Some(applied) = &self.applied_layout else {
            info!("Snapshot has no applied layout");
            return Ok(None);
        };

        model.refresh_template_zones(applied, engine);
        Ok(model.resolve_applied_layout(applied))
    }
}

/// Convenience for callers that only hold a digit.
#[must_use]
pub fn hotkey(digit: u8, layout_id: Uuid) -> Option<HotkeyRecord> {
    ShortcutKey::digit(digit).map(|key| HotkeyRecord { key, layout_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::LayoutType;
    use crate::services::UniformZoneEngine;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"{
        "custom-layouts": [
            { "uuid": "6d7e2a40-3b36-4c6a-9d62-1d7b50d0f001", "name": "Coding", "quick-key": 2 },
            {
                "uuid": "6d7e2a40-3b36-4c6a-9d62-1d7b50d0f002",
                "name": "Writing",
                "zones": [{ "x": 0, "y": 0, "width": 10000, "height": 10000 }]
            }
        ],
        "applied-layout": { "type": "columns", "zone-count": 4 }
    }"#;

    #[test]
    fn test_parse_snapshot() {
        let snapshot = EditorSnapshot::parse(SNAPSHOT).unwrap();
        assert_eq!(snapshot.custom_layouts.len(), 2);
        assert_eq!(
            snapshot.custom_layouts[0].quick_key,
            ShortcutKey::digit(2).unwrap()
        );
        assert_eq!(snapshot.custom_layouts[1].quick_key, ShortcutKey::NONE);
        assert_eq!(snapshot.custom_layouts[1].zones.len(), 1);
        assert!(snapshot.layout_hotkeys.is_empty());
    }

    #[test]
    fn test_oversized_zone_count_rejected() {
        let json = r#"{ "applied-layout": { "type": "columns", "zone-count": 5000 } }"#;
        let err = EditorSnapshot::parse(json).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds maximum"));

        let json = r#"{ "applied-layout": { "type": "columns", "zone-count": 128 } }"#;
        assert!(EditorSnapshot::parse(json).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let id = Uuid::new_v4();
        let record = CustomLayoutRecord {
            uuid: id,
            name: "Twice".to_string(),
            quick_key: ShortcutKey::NONE,
            zones: Vec::new(),
        };
        let snapshot = EditorSnapshot {
            custom_layouts: vec![record.clone(), record],
            ..EditorSnapshot::default()
        };
        assert!(snapshot.custom_layouts().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = EditorSnapshot::load(&temp_dir.path().join("missing.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_to_model() {
        let model = SettingsModel::new(&Config::new());
        model.init_templates(&UniformZoneEngine).unwrap();

        let snapshot = EditorSnapshot::parse(SNAPSHOT).unwrap();
        let resolved = snapshot.apply_to(&model, &UniformZoneEngine).unwrap().unwrap();

        assert_eq!(resolved.layout_type(), LayoutType::Columns);
        assert_eq!(resolved.model().zones.len(), 4);
        assert!(resolved.is_selected() && resolved.is_applied());

        let names: Vec<String> = model
            .custom_layouts()
            .snapshot()
            .iter()
            .map(|l| l.name())
            .collect();
        assert_eq!(names, vec!["Coding", "Writing"]);
    }

    #[test]
    fn test_hotkeys_override_quick_keys() {
        let model = SettingsModel::new(&Config::new());
        let mut snapshot = EditorSnapshot::parse(SNAPSHOT).unwrap();
        let writing = snapshot.custom_layouts[1].uuid;
        snapshot.layout_hotkeys = vec![hotkey(0, writing).unwrap()];
        snapshot.applied_layout = None;

        assert!(snapshot.apply_to(&model, &UniformZoneEngine).unwrap().is_none());

        let labels: Vec<String> = model
            .shortcut_display()
            .snapshot()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["None", "0 - Writing"]);
        assert_eq!(model.custom_layouts().get(0).unwrap().id(), writing);
    }
}
