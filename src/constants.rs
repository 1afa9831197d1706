//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the template defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Zone Layout Editor";

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = "ZoneLayoutEditor";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "ZONEDIT_CONFIG_DIR";

/// Zone coordinates are expressed in basis points of the work area.
pub const GRID_MULTIPLIER: u32 = 10_000;

/// Zone count given to every non-blank template unless configured otherwise.
pub const DEFAULT_ZONE_COUNT: u32 = 3;

/// Spacing between zones, in pixels.
pub const DEFAULT_SPACING: i32 = 16;

/// Distance in pixels at which neighbouring zones are highlighted together.
pub const DEFAULT_SENSITIVITY_RADIUS: u32 = 20;

/// Upper bound on the zone count of a template.
pub const MAX_ZONE_COUNT: u32 = 128;

/// Lowest allowed spacing (zones may overlap by this much).
pub const MAX_NEGATIVE_SPACING: i32 = -10;

/// Upper bound on the sensitivity radius.
pub const MAX_SENSITIVITY_RADIUS: u32 = 1000;
