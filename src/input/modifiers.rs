//! Keyboard modifier state attached to a key press.

/// Keyboard modifier state.
///
/// Tracks which modifier keys (Ctrl, Shift, Alt) accompany a key press so
/// bindings such as `Ctrl+Z` can be told apart from a bare `Z`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Shift key pressed
    pub shift: bool,
    /// Alt key pressed
    pub alt: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.shift || self.alt)
    }
}
