//! Application configuration module
//!
//! This module handles application-wide configuration including editor
//! defaults and UI settings.

mod manager;

pub use manager::{
    ConfigChange, ConfigError, ConfigManager, SAVE_DELAY, SharedConfig, create_shared_config,
};

use serde::{Deserialize, Serialize};

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// "Include children of ignored parts" toggle for the session
    pub include_children_of_ignored: bool,
    /// New mass field value after start, Clear and Apply
    pub default_new_mass: f32,
    /// Decimal places shown for mass ratios
    pub ratio_decimals: usize,
    /// List nodes without a rigid body in the hierarchy panel
    pub show_massless_nodes: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            include_children_of_ignored: false,
            default_new_mass: 0.0,
            ratio_decimals: 4,
            show_massless_nodes: true,
        }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// UI theme
    pub theme: UiTheme,
    /// Font size multiplier
    pub font_size: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            font_size: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    /// Editor settings
    #[serde(default)]
    pub editor: EditorConfig,
    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}
