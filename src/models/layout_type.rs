//! Layout type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of zone arrangement a layout describes.
///
/// Serialized in kebab-case (`"priority-grid"`), matching the host's
/// applied-layout reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    /// No zones at all
    Blank,
    /// Overlapping cascaded zones
    Focus,
    /// Side-by-side vertical zones
    Columns,
    /// Stacked horizontal zones
    Rows,
    /// Evenly divided grid
    Grid,
    /// Wide centre column flanked by smaller zones
    PriorityGrid,
    /// User-defined arrangement
    Custom,
}

impl LayoutType {
    /// Built-in template types, in the order the template list presents them.
    pub const TEMPLATES: [Self; 6] = [
        Self::Blank,
        Self::Focus,
        Self::Columns,
        Self::Rows,
        Self::Grid,
        Self::PriorityGrid,
    ];

    /// Returns true for every type except [`LayoutType::Custom`].
    #[must_use]
    pub const fn is_template(self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Stable identifier used in serialized data and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Focus => "focus",
            Self::Columns => "columns",
            Self::Rows => "rows",
            Self::Grid => "grid",
            Self::PriorityGrid => "priority-grid",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
