//! Keybinding configuration types and parsing.
//!
//! Maps user-facing key strings to the discrete drawing commands the state
//! machine understands. Every action can be bound to several keys.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All discrete commands that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Session
    Exit,

    // Canvas and history
    ClearCanvas,
    Undo,
    Redo,

    // Brush width
    IncreaseBrush,
    DecreaseBrush,

    // Mode toggles
    ToggleRandomColor,
    ToggleDrawMode,
    ToggleEraser,

    // Color selections
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorBlack,
    SetColorWhite,
}

/// A single keybinding: a key character with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parses strings such as `"R"`, `"Ctrl+Z"`, `"Escape"` or `"+"`.
    ///
    /// Modifiers may come in any order and spaces around `+` are ignored. A
    /// trailing `+` after the modifiers is the plus key itself (`"Ctrl++"`).
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let compact: String = s.split('+').map(str::trim).collect::<Vec<_>>().join("+");
        let (mut ctrl, mut shift, mut alt) = (false, false, false);
        let mut rest = compact.as_str();

        while let Some((head, tail)) = rest.split_once('+') {
            match head.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => break,
            }
            rest = tail;
        }

        let key = match rest {
            "" if compact.ends_with('+') => "+",
            "" => return Err(format!("No key specified in: {}", s)),
            other => other,
        };

        Ok(Self {
            key: key.to_string(),
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// exit = ["Escape", "Ctrl+Q"]
/// undo = ["Z", "Ctrl+Z"]
/// clear_canvas = ["C"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_increase_brush")]
    pub increase_brush: Vec<String>,

    #[serde(default = "default_decrease_brush")]
    pub decrease_brush: Vec<String>,

    #[serde(default = "default_toggle_random_color")]
    pub toggle_random_color: Vec<String>,

    #[serde(default = "default_toggle_draw_mode")]
    pub toggle_draw_mode: Vec<String>,

    #[serde(default = "default_toggle_eraser")]
    pub toggle_eraser: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            clear_canvas: default_clear_canvas(),
            undo: default_undo(),
            redo: default_redo(),
            increase_brush: default_increase_brush(),
            decrease_brush: default_decrease_brush(),
            toggle_random_color: default_toggle_random_color(),
            toggle_draw_mode: default_toggle_draw_mode(),
            toggle_eraser: default_toggle_eraser(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_black: default_set_color_black(),
            set_color_white: default_set_color_white(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        // Helper closure to insert and check for duplicates
        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        let groups: [(&[String], Action); 14] = [
            (&self.exit, Action::Exit),
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.increase_brush, Action::IncreaseBrush),
            (&self.decrease_brush, Action::DecreaseBrush),
            (&self.toggle_random_color, Action::ToggleRandomColor),
            (&self.toggle_draw_mode, Action::ToggleDrawMode),
            (&self.toggle_eraser, Action::ToggleEraser),
            (&self.set_color_red, Action::SetColorRed),
            (&self.set_color_green, Action::SetColorGreen),
            (&self.set_color_blue, Action::SetColorBlue),
            (&self.set_color_black, Action::SetColorBlack),
            (&self.set_color_white, Action::SetColorWhite),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_exit() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Z".to_string(), "Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Y".to_string(), "Ctrl+Y".to_string()]
}

fn default_increase_brush() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_brush() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_toggle_random_color() -> Vec<String> {
    vec!["M".to_string()]
}

fn default_toggle_draw_mode() -> Vec<String> {
    vec!["D".to_string()]
}

fn default_toggle_eraser() -> Vec<String> {
    vec!["E".to_string()]
}

fn default_set_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_set_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_set_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_set_color_black() -> Vec<String> {
    vec!["K".to_string()]
}

fn default_set_color_white() -> Vec<String> {
    vec!["W".to_string()]
}
