//! Layout entities shared between the settings model and its observers.

use crate::constants::{
    DEFAULT_SENSITIVITY_RADIUS, DEFAULT_SPACING, DEFAULT_ZONE_COUNT, GRID_MULTIPLIER,
};
use crate::models::{LayoutType, ShortcutKey};
use crate::notify::Notifier;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use uuid::Uuid;

/// A rectangular zone, in basis points of the work area
/// (`GRID_MULTIPLIER` = full width or height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub width: u32,
    /// Height
    pub height: u32,
}

impl Zone {
    /// Creates a zone from its position and size.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the zone lies entirely inside the work area.
    #[must_use]
    pub const fn is_within_bounds(&self) -> bool {
        self.x + self.width <= GRID_MULTIPLIER && self.y + self.height <= GRID_MULTIPLIER
    }
}

/// A template or custom zone layout.
///
/// # Validation
///
/// - name must be non-empty, max 100 characters
/// - custom layouts keep their zones as given; templates get theirs from a
///   [`ZoneEngine`](crate::services::ZoneEngine)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutModel {
    /// Unique identifier
    pub id: Uuid,
    /// Display name (e.g., "Columns", "Coding setup")
    pub name: String,
    /// Type tag
    pub layout_type: LayoutType,
    /// Currently selected in the editor
    pub is_selected: bool,
    /// Currently applied on the desktop
    pub is_applied: bool,
    /// Zone count a template is generated with
    pub zone_count: u32,
    /// Whether spacing between zones is shown
    pub show_spacing: bool,
    /// Spacing between zones, in pixels
    pub spacing: i32,
    /// Highlight distance for neighbouring zones, in pixels
    pub sensitivity_radius: u32,
    /// Quick-switch key (custom layouts only)
    pub shortcut: ShortcutKey,
    /// Zone geometry
    pub zones: Vec<Zone>,
}

impl LayoutModel {
    /// Creates a template layout with default parameters and no zones yet.
    ///
    /// # Errors
    ///
    /// Returns an error if `layout_type` is [`LayoutType::Custom`] or the
    /// name fails validation.
    pub fn template(name: impl Into<String>, layout_type: LayoutType) -> Result<Self> {
        if !layout_type.is_template() {
            anyhow::bail!("Layout type '{layout_type}' is not a template type");
        }
        Self::build(Uuid::new_v4(), name.into(), layout_type, Vec::new())
    }

    /// Creates a custom layout with externally owned zone geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or longer than 100 characters.
    pub fn custom(id: Uuid, name: impl Into<String>, zones: Vec<Zone>) -> Result<Self> {
        let mut layout = Self::build(id, name.into(), LayoutType::Custom, zones)?;
        layout.zone_count = u32::try_from(layout.zones.len()).unwrap_or(u32::MAX);
        Ok(layout)
    }

    fn build(id: Uuid, name: String, layout_type: LayoutType, zones: Vec<Zone>) -> Result<Self> {
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            layout_type,
            is_selected: false,
            is_applied: false,
            zone_count: DEFAULT_ZONE_COUNT,
            show_spacing: true,
            spacing: DEFAULT_SPACING,
            sensitivity_radius: DEFAULT_SENSITIVITY_RADIUS,
            shortcut: ShortcutKey::NONE,
            zones,
        })
    }

    /// Validates layout name.
    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Layout name cannot be empty");
        }

        if name.len() > 100 {
            anyhow::bail!(
                "Layout name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.len()
            );
        }

        Ok(())
    }

    /// Whether this is a user-defined layout.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self.layout_type, LayoutType::Custom)
    }
}

/// Emitted by a [`LayoutEntry`] whose shortcut key changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutChange {
    /// Layout whose key changed
    pub layout_id: Uuid,
    /// Key before the change
    pub previous: ShortcutKey,
    /// Key after the change
    pub current: ShortcutKey,
}

/// Shared handle to a layout held by the settings model and by observers.
pub type LayoutRef = Rc<LayoutEntry>;

/// A [`LayoutModel`] with interior mutability and a shortcut-change notifier.
///
/// Entries are compared by identity (`Rc::ptr_eq`), not by value.
#[derive(Debug)]
pub struct LayoutEntry {
    model: RefCell<LayoutModel>,
    shortcut_changed: Notifier<ShortcutChange>,
}

impl LayoutEntry {
    /// Wraps a model in a new shared handle.
    #[must_use]
    pub fn new(model: LayoutModel) -> LayoutRef {
        Rc::new(Self {
            model: RefCell::new(model),
            shortcut_changed: Notifier::new(),
        })
    }

    /// Read access to the underlying model.
    ///
    /// The borrow must be dropped before calling any mutating method.
    pub fn model(&self) -> Ref<'_, LayoutModel> {
        self.model.borrow()
    }

    /// Layout id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.model.borrow().id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> String {
        self.model.borrow().name.clone()
    }

    /// Layout type.
    #[must_use]
    pub fn layout_type(&self) -> LayoutType {
        self.model.borrow().layout_type
    }

    /// Whether the layout is selected in the editor.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.model.borrow().is_selected
    }

    /// Whether the layout is applied on the desktop.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.model.borrow().is_applied
    }

    /// Assigned shortcut key.
    #[must_use]
    pub fn shortcut(&self) -> ShortcutKey {
        self.model.borrow().shortcut
    }

    /// Configured zone count.
    #[must_use]
    pub fn zone_count(&self) -> u32 {
        self.model.borrow().zone_count
    }

    /// Renames the layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the name fails validation.
    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        LayoutModel::validate_name(&name)?;
        self.model.borrow_mut().name = name;
        Ok(())
    }

    /// Binds the layout to `key` and notifies shortcut listeners if it changed.
    pub fn set_shortcut(&self, key: ShortcutKey) {
        let previous = std::mem::replace(&mut self.model.borrow_mut().shortcut, key);
        if previous != key {
            self.shortcut_changed.emit(&ShortcutChange {
                layout_id: self.id(),
                previous,
                current: key,
            });
        }
    }

    /// Listeners for shortcut changes on this layout.
    pub fn shortcut_changed(&self) -> &Notifier<ShortcutChange> {
        &self.shortcut_changed
    }

    /// Changes the shortcut without notifying, for keeping the field in sync
    /// with the owning shortcut map.
    pub(crate) fn sync_shortcut(&self, key: ShortcutKey) {
        self.model.borrow_mut().shortcut = key;
    }

    pub(crate) fn set_selected(&self, selected: bool) {
        self.model.borrow_mut().is_selected = selected;
    }

    pub(crate) fn set_applied(&self, applied: bool) {
        self.model.borrow_mut().is_applied = applied;
    }

    /// Mutates the model in place. Must not be used to change the shortcut.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut LayoutModel) -> R) -> R {
        f(&mut self.model.borrow_mut())
    }
}
