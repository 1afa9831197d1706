//! Host-reported applied layout and monitor orientation.

use crate::constants::{
    DEFAULT_SENSITIVITY_RADIUS, DEFAULT_SPACING, DEFAULT_ZONE_COUNT, MAX_ZONE_COUNT,
};
use crate::models::LayoutType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The layout the host reports as currently active on the desktop.
///
/// Field names follow the host's kebab-case settings format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppliedLayout {
    /// Type of the applied layout
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Identifier; only meaningful for custom layouts
    #[serde(default)]
    pub uuid: Option<Uuid>,
    /// Zone count the layout was applied with
    #[serde(default = "default_zone_count")]
    pub zone_count: u32,
    /// Show spacing between zones
    #[serde(default = "default_show_spacing")]
    pub show_spacing: bool,
    /// Spacing between zones, in pixels
    #[serde(default = "default_spacing")]
    pub spacing: i32,
    /// Highlight distance for neighbouring zones, in pixels
    #[serde(default = "default_sensitivity_radius")]
    pub sensitivity_radius: u32,
}

fn default_zone_count() -> u32 {
    DEFAULT_ZONE_COUNT
}

fn default_show_spacing() -> bool {
    true
}

fn default_spacing() -> i32 {
    DEFAULT_SPACING
}

fn default_sensitivity_radius() -> u32 {
    DEFAULT_SENSITIVITY_RADIUS
}

impl AppliedLayout {
    /// A template report with default parameters and the given zone count.
    #[must_use]
    pub fn template(layout_type: LayoutType, zone_count: u32) -> Self {
        Self {
            layout_type,
            uuid: None,
            zone_count,
            show_spacing: default_show_spacing(),
            spacing: default_spacing(),
            sensitivity_radius: default_sensitivity_radius(),
        }
    }

    /// A custom-layout report.
    #[must_use]
    pub fn custom(uuid: Uuid) -> Self {
        Self {
            uuid: Some(uuid),
            ..Self::template(LayoutType::Custom, default_zone_count())
        }
    }

    /// Reported zone count capped at [`MAX_ZONE_COUNT`].
    #[must_use]
    pub fn bounded_zone_count(&self) -> u32 {
        self.zone_count.min(MAX_ZONE_COUNT)
    }
}

/// Monitor orientation bucket used for choosing a default layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitorOrientation {
    /// Taller than wide
    Vertical,
    /// Wider than tall
    Horizontal,
}
