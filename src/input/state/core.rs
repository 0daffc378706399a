//! Drawing state machine and session state.

use crate::config::{Action, Config, KeyBinding};
use crate::draw::{BLACK, CanvasHistory, Color, DrawError, Point, Raster};
use crate::gesture::CooldownGate;
use crate::input::events::KeyPress;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Canvas fill and eraser color. Black adds nothing to the video underneath.
pub const BACKGROUND: Color = BLACK;

/// What the machine did with the most recent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingState {
    /// No hand in view; pointer forgotten and save gate rearmed
    #[default]
    NoHand,
    /// Hand present but nothing was painted (draw mode off, or thumbs-up held)
    Idle,
    /// A stroke segment was painted in a color
    Drawing,
    /// A stroke segment was painted with the background color
    Erasing,
    /// The thumbs-up gate fired this frame and the canvas was handed off
    SaveTriggered,
}

/// Owns every piece of session state: the canvas, its history, the brush
/// parameters, the save gate and the previous pointer.
///
/// All mutation goes through `&mut self`, either per frame via
/// `process_frame` or per key press via `on_key_press`.
pub struct DrawingMachine {
    /// Canvas, allocated at the size of the first frame
    pub(super) canvas: Option<Raster>,
    /// Undo/redo snapshots of the canvas
    pub(super) history: CanvasHistory,
    /// Fixed stroke color (changed with color keys: R, G, B, K, W)
    pub current_color: Color,
    /// Stroke width in pixels (changed with +/- keys)
    pub brush_size: u32,
    /// Whether pointer movement paints at all
    pub draw_mode: bool,
    /// Pick a fresh random color for every segment
    pub random_color: bool,
    /// Explicit eraser selection; the open-palm override is per frame
    pub eraser: bool,
    /// Whether the status overlay is composited onto the output
    pub show_hud: bool,
    /// Whether the hand skeleton is drawn onto the video frame
    pub show_landmarks: bool,
    /// Result of the most recent frame
    pub state: DrawingState,
    /// Whether the exit action was triggered
    pub should_exit: bool,
    /// Index fingertip from the previous frame with a hand
    pub(super) prev_pointer: Option<Point>,
    pub(super) save_gate: CooldownGate,
    pub(super) rng: StdRng,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl DrawingMachine {
    /// Creates a machine with explicit brush defaults.
    ///
    /// # Arguments
    /// * `color` - Initial stroke color
    /// * `brush_size` - Initial stroke width in pixels (raised to at least 1)
    /// * `history_limit` - Maximum number of undo snapshots
    /// * `action_map` - Keybinding action map
    pub fn with_defaults(
        color: Color,
        brush_size: u32,
        history_limit: usize,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            canvas: None,
            history: CanvasHistory::new(history_limit),
            current_color: color,
            brush_size: brush_size.max(1),
            draw_mode: true,
            random_color: false,
            eraser: false,
            show_hud: true,
            show_landmarks: true,
            state: DrawingState::NoHand,
            should_exit: false,
            prev_pointer: None,
            save_gate: CooldownGate::new(),
            rng: StdRng::from_entropy(),
            action_map,
        }
    }

    /// Creates a machine from loaded configuration.
    pub fn from_config(config: &Config, action_map: HashMap<KeyBinding, Action>) -> Self {
        let drawing = &config.drawing;
        let mut machine = Self::with_defaults(
            drawing.default_color.to_color(),
            drawing.brush_size,
            drawing.history_limit,
            action_map,
        );
        machine.draw_mode = drawing.draw_mode;
        machine.random_color = drawing.random_color;
        machine.show_hud = config.ui.show_hud;
        machine.show_landmarks = config.ui.show_landmarks;
        machine
    }

    /// Replaces the random source, for reproducible random-color strokes.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// The canvas, once the first frame has been seen.
    pub fn canvas(&self) -> Option<&Raster> {
        self.canvas.as_ref()
    }

    pub fn history(&self) -> &CanvasHistory {
        &self.history
    }

    pub fn prev_pointer(&self) -> Option<Point> {
        self.prev_pointer
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Looks up the action bound to a key press, if any.
    pub(super) fn find_action(&self, press: &KeyPress) -> Option<Action> {
        let key_str = press.key.key_str()?;
        for (binding, action) in &self.action_map {
            if binding.matches(
                &key_str,
                press.modifiers.ctrl,
                press.modifiers.shift,
                press.modifiers.alt,
            ) {
                return Some(*action);
            }
        }
        None
    }

    pub(super) fn random_rgb(&mut self) -> Color {
        Color::from_rgb8(
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
            self.rng.gen_range(0..=255),
        )
    }

    /// Stroke color for one segment: random > eraser > fixed color.
    pub(super) fn stroke_color(&mut self, eraser: bool) -> Color {
        if self.random_color {
            self.random_rgb()
        } else if eraser {
            BACKGROUND
        } else {
            self.current_color
        }
    }

    /// Swatch color shown in the HUD: eraser > random > fixed color.
    pub(super) fn preview_color(&mut self, eraser: bool) -> Color {
        if eraser {
            BACKGROUND
        } else if self.random_color {
            self.random_rgb()
        } else {
            self.current_color
        }
    }

    /// Returns the canvas, allocating it at `size` on first use.
    pub(super) fn ensure_canvas(&mut self, size: (u32, u32)) -> Result<&mut Raster, DrawError> {
        let canvas = match self.canvas.take() {
            Some(canvas) => canvas,
            None => {
                log::debug!("Allocating {}x{} canvas", size.0, size.1);
                Raster::filled(size.0, size.1, BACKGROUND)?
            }
        };
        Ok(self.canvas.insert(canvas))
    }
}
