//! Configuration management for the application.
//!
//! This module handles loading and validating application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{
    CONFIG_DIR_ENV, CONFIG_DIR_NAME, DEFAULT_SENSITIVITY_RADIUS, DEFAULT_SPACING,
    DEFAULT_ZONE_COUNT, MAX_NEGATIVE_SPACING, MAX_SENSITIVITY_RADIUS, MAX_ZONE_COUNT,
};
use crate::models::LayoutType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Parameters every non-blank template starts with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateDefaults {
    /// Zone count for focus, columns, rows, grid and priority-grid
    pub zone_count: u32,
    /// Spacing between zones, in pixels
    pub spacing: i32,
    /// Show spacing between zones
    pub show_spacing: bool,
    /// Highlight distance for neighbouring zones, in pixels
    pub sensitivity_radius: u32,
}

impl Default for TemplateDefaults {
    fn default() -> Self {
        Self {
            zone_count: DEFAULT_ZONE_COUNT,
            spacing: DEFAULT_SPACING,
            show_spacing: true,
            sensitivity_radius: DEFAULT_SENSITIVITY_RADIUS,
        }
    }
}

/// User-visible names for templates and the "no shortcut" entry.
///
/// Override these in `config.toml` to localize the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    /// Name of the blank template
    pub blank: String,
    /// Name of the focus template
    pub focus: String,
    /// Name of the columns template
    pub columns: String,
    /// Name of the rows template
    pub rows: String,
    /// Name of the grid template
    pub grid: String,
    /// Name of the priority grid template
    pub priority_grid: String,
    /// Label of the first row in the shortcut display list
    pub no_shortcut: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            blank: "No layout".to_string(),
            focus: "Focus".to_string(),
            columns: "Columns".to_string(),
            rows: "Rows".to_string(),
            grid: "Grid".to_string(),
            priority_grid: "Priority Grid".to_string(),
            no_shortcut: "None".to_string(),
        }
    }
}

impl Strings {
    /// Display name of a template type. Custom layouts carry their own name,
    /// so `Custom` maps to an empty string.
    #[must_use]
    pub fn template_name(&self, layout_type: LayoutType) -> &str {
        match layout_type {
            LayoutType::Blank => &self.blank,
            LayoutType::Focus => &self.focus,
            LayoutType::Columns => &self.columns,
            LayoutType::Rows => &self.rows,
            LayoutType::Grid => &self.grid,
            LayoutType::PriorityGrid => &self.priority_grid,
            LayoutType::Custom => "",
        }
    }

    fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("blank", self.blank.as_str()),
            ("focus", self.focus.as_str()),
            ("columns", self.columns.as_str()),
            ("rows", self.rows.as_str()),
            ("grid", self.grid.as_str()),
            ("priority_grid", self.priority_grid.as_str()),
            ("no_shortcut", self.no_shortcut.as_str()),
        ]
    }
}

/// Logging preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g., "info", "zonedit=debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/ZoneLayoutEditor/config.toml`
/// - macOS: `~/Library/Application Support/ZoneLayoutEditor/config.toml`
/// - Windows: `%APPDATA%\ZoneLayoutEditor\config.toml`
///
/// `$ZONEDIT_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `templates.zone_count` must not exceed 128
/// - `templates.spacing` must be at least -10
/// - `templates.sensitivity_radius` must not exceed 1000
/// - every string must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Template defaults
    pub templates: TemplateDefaults,
    /// Display strings
    pub strings: Strings,
    /// Logging preferences
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the config directory path.
    ///
    /// Uses `$ZONEDIT_CONFIG_DIR` if set, otherwise the platform config
    /// directory joined with `ZoneLayoutEditor`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let templates = &self.templates;

        if templates.zone_count > MAX_ZONE_COUNT {
            anyhow::bail!(
                "Template zone count {} exceeds maximum of {}",
                templates.zone_count,
                MAX_ZONE_COUNT
            );
        }

        if templates.spacing < MAX_NEGATIVE_SPACING {
            anyhow::bail!(
                "Template spacing {} is below minimum of {}",
                templates.spacing,
                MAX_NEGATIVE_SPACING
            );
        }

        if templates.sensitivity_radius > MAX_SENSITIVITY_RADIUS {
            anyhow::bail!(
                "Sensitivity radius {} exceeds maximum of {}",
                templates.sensitivity_radius,
                MAX_SENSITIVITY_RADIUS
            );
        }

        for (key, value) in self.strings.all() {
            if value.trim().is_empty() {
                anyhow::bail!("String '{key}' cannot be empty");
            }
        }

        if self.logging.level.trim().is_empty() {
            anyhow::bail!("Logging level cannot be empty");
        }

        Ok(())
    }
}
