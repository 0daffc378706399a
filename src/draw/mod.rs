//! Raster canvas, stroke rasterization, history, and compositing (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Raster`]: fixed-size pixel buffer used for frames, canvas and snapshots
//! - [`draw_segment`]: straight stroke between two raster points
//! - [`CanvasHistory`]: bounded undo / unbounded redo of canvas snapshots
//! - Compositing and overlay functions for the output frame

pub mod color;
pub mod error;
pub mod history;
pub mod raster;
pub mod render;
pub mod stroke;

// Re-export commonly used types at module level
pub use color::Color;
pub use error::DrawError;
pub use history::{CanvasHistory, DEFAULT_HISTORY_LIMIT};
pub use raster::Raster;
pub use render::{HudStatus, composite, render_hud, render_landmarks};
pub use stroke::{Point, draw_segment};

pub use color::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
