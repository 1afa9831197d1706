//! Service layer for logic around the settings model.
//!
//! This module contains the zone engine seam, the shortcut display
//! derivation and snapshot loading.

pub mod shortcut_display;
pub mod snapshot;
pub mod zones;

// Re-export commonly used types and functions
pub use shortcut_display::{shortcut_display_entries, ShortcutDisplayEntry};
pub use snapshot::EditorSnapshot;
pub use zones::{UniformZoneEngine, ZoneEngine};
