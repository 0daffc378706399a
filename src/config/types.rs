//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the brush state when a session starts. Users can change these
/// values at runtime using keybindings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default pen color - either a named color (red, green, blue, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush width in pixels (valid range: 1 - 50)
    #[serde(default = "default_brush_size")]
    pub brush_size: u32,

    /// Whether hand motion draws as soon as the session starts
    #[serde(default = "default_draw_mode")]
    pub draw_mode: bool,

    /// Start with a fresh random color on every frame
    #[serde(default)]
    pub random_color: bool,

    /// Number of undo steps kept in memory (valid range: 1 - 200)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            brush_size: default_brush_size(),
            draw_mode: default_draw_mode(),
            random_color: false,
            history_limit: default_history_limit(),
        }
    }
}

/// Where thumbs-up saves are written.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// Directory for saved drawings (`~` is expanded)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template, chrono format specifiers allowed
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format extension (only "png" is supported)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Show the color swatch and status lines
    #[serde(default = "default_true")]
    pub show_hud: bool,

    /// Draw the tracked hand skeleton over the video
    #[serde(default = "default_true")]
    pub show_landmarks: bool,

    /// Flip incoming frames horizontally before pose estimation (selfie view)
    #[serde(default = "default_true")]
    pub mirror_input: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_hud: true,
            show_landmarks: true,
            mirror_input: true,
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("blue".to_string())
}

fn default_brush_size() -> u32 {
    4
}

fn default_draw_mode() -> bool {
    true
}

fn default_history_limit() -> usize {
    crate::draw::DEFAULT_HISTORY_LIMIT
}

fn default_save_directory() -> String {
    "~/Pictures/Handscriber".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_true() -> bool {
    true
}
