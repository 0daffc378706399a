//! Discrete keyboard events delivered by an event source.

use super::modifiers::Modifiers;
use crate::config::KeyBinding;
use std::fmt;
use std::str::FromStr;

/// Generic key representation.
///
/// Event sources map their native key codes to these values so the drawing
/// machine never depends on a particular windowing or replay backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Space bar
    Space,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used when looking the key up in the keybinding map.
    ///
    /// Returns `None` for keys that can never be bound.
    pub fn key_str(&self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::Unknown => None,
        }
    }

    fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c.to_ascii_lowercase());
        }
        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "space" => Key::Space,
            _ => Key::Unknown,
        }
    }
}

/// One key press together with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

/// Parses the same notation as keybinding config entries, e.g. `"r"`,
/// `"Ctrl+Z"` or `"Escape"`.
impl FromStr for KeyPress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let binding = KeyBinding::parse(s)?;
        let key = Key::from_name(&binding.key);
        if key == Key::Unknown {
            return Err(format!("Unknown key '{}' in: {}", binding.key, s));
        }
        Ok(Self {
            key,
            modifiers: Modifiers {
                ctrl: binding.ctrl,
                shift: binding.shift,
                alt: binding.alt,
            },
        })
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        match self.key.key_str() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "?"),
        }
    }
}
