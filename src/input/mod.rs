//! Input handling and the drawing state machine.
//!
//! This module turns per-frame hand classifications and discrete key presses
//! into canvas mutations. It owns the brush parameters (color, width, modes)
//! and the state machine that decides, frame by frame, whether to draw, erase,
//! save or do nothing.

pub mod events;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Key, KeyPress};
pub use modifiers::Modifiers;
pub use state::{DrawingMachine, DrawingState, FrameOutput};
