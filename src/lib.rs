//! Zone Layout Editor Library
//!
//! This library provides the settings model behind a desktop zone layout
//! editor: built-in templates, custom layouts, quick-switch shortcuts,
//! selection and applied state, and change notification for UI bindings.

// Module declarations
pub mod config;
pub mod constants;
pub mod models;
pub mod notify;
pub mod services;
pub mod settings_model;

pub use settings_model::{Property, SettingsModel};
