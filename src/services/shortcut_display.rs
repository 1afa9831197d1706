//! Shortcut display list derivation.
//!
//! The display list is recomputed from scratch whenever the shortcut map or
//! the custom layout set changes; nothing here knows about notifications.

use crate::models::{LayoutRef, ShortcutKey, ShortcutMap};
use serde::Serialize;
use uuid::Uuid;

/// One row of the shortcut display list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortcutDisplayEntry {
    /// The key this row describes
    pub key: ShortcutKey,
    /// Layout bound to the key (never set for the "none" row)
    pub layout_id: Option<Uuid>,
    /// Text shown to the user, e.g. `"3 - Coding"`
    pub label: String,
}

/// Builds the display list: the "none" row first, then one row per assigned
/// digit key in ascending order.
///
/// Unassigned digits are omitted. A row reads `"key - name"` when the bound
/// id belongs to one of `custom_layouts`, and just `"key"` otherwise.
#[must_use]
pub fn shortcut_display_entries(
    shortcuts: &ShortcutMap,
    custom_layouts: &[LayoutRef],
    none_label: &str,
) -> Vec<ShortcutDisplayEntry> {
    ShortcutKey::all()
        .filter_map(|key| {
            if key.is_none() {
                return Some(ShortcutDisplayEntry {
                    key,
                    layout_id: None,
                    label: none_label.to_string(),
                });
            }

            let layout_id = shortcuts.get(key)?;
            let name = custom_layouts
                .iter()
                .find(|layout| layout.id() == layout_id)
                .map(|layout| layout.name());

            let label = match name {
                Some(name) => format!("{} - {}", key.label(none_label), name),
                None => key.label(none_label),
            };

            Some(ShortcutDisplayEntry {
                key,
                layout_id: Some(layout_id),
                label,
            })
        })
        .collect()
}
