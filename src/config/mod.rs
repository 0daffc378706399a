//! Configuration file support for handscriber.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/handscriber/config.toml`. Settings include brush defaults,
//! history depth, save location, overlay preferences, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CaptureConfig, DrawingConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// brush_size = 6
/// history_limit = 30
///
/// [capture]
/// save_directory = "~/Pictures/Handscriber"
///
/// [ui]
/// show_landmarks = false
///
/// [keybindings]
/// undo = ["Z", "Ctrl+Z"]
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults and history depth
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Where saved drawings go
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Overlay and camera view preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Keyboard shortcuts for discrete commands
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_size`: 1 - 50
    /// - `history_limit`: 1 - 200
    /// - `capture.format`: "png"
    fn validate_and_clamp(&mut self) {
        // Brush size: 1 - 50
        if !(1..=50).contains(&self.drawing.brush_size) {
            log::warn!(
                "Invalid brush_size {}, clamping to 1-50 range",
                self.drawing.brush_size
            );
            self.drawing.brush_size = self.drawing.brush_size.clamp(1, 50);
        }

        // History limit: 1 - 200
        if !(1..=200).contains(&self.drawing.history_limit) {
            log::warn!(
                "Invalid history_limit {}, clamping to 1-200 range",
                self.drawing.history_limit
            );
            self.drawing.history_limit = self.drawing.history_limit.clamp(1, 200);
        }

        // Only PNG output is written
        if !self.capture.format.eq_ignore_ascii_case("png") {
            log::warn!(
                "Unsupported capture format '{}', falling back to 'png'",
                self.capture.format
            );
            self.capture.format = "png".to_string();
        }

        if self.capture.filename_template.trim().is_empty() {
            log::warn!("Empty filename_template, falling back to default");
            self.capture.filename_template = CaptureConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/handscriber/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("handscriber");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    /// JSON Schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
