mod actions;
mod core;
mod frame;
#[cfg(test)]
mod tests;

pub use core::{BACKGROUND, DrawingMachine, DrawingState};
pub use frame::{ERASER_TEXT, FrameOutput, SAVE_FAILED_TEXT, SAVED_TEXT};
