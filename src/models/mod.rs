//! Data models for zone layouts, shortcuts and host reports.
//!
//! Models are independent of any UI toolkit. Layouts are shared through
//! [`LayoutRef`] handles so observers see the same entity the settings
//! model mutates.

pub mod applied;
pub mod layout;
pub mod layout_type;
pub mod shortcut;

// Re-export all model types
pub use applied::{AppliedLayout, MonitorOrientation};
pub use layout::{LayoutEntry, LayoutModel, LayoutRef, ShortcutChange, Zone};
pub use layout_type::LayoutType;
pub use shortcut::{ShortcutKey, ShortcutMap};
