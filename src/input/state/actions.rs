use crate::config::Action;
use crate::draw::{BLACK, BLUE, Color, DrawError, GREEN, RED, WHITE};
use crate::input::events::KeyPress;
use crate::util;

use super::DrawingMachine;
use super::core::BACKGROUND;

impl DrawingMachine {
    /// Processes a key press event.
    ///
    /// Unbound keys are ignored. Bound keys run their action immediately;
    /// the effect is visible from the next processed frame.
    pub fn on_key_press(&mut self, press: KeyPress) -> Result<(), DrawError> {
        match self.find_action(&press) {
            Some(action) => {
                log::debug!("Key {} -> {:?}", press, action);
                self.handle_action(action)
            }
            None => Ok(()),
        }
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) -> Result<(), DrawError> {
        match action {
            Action::Exit => {
                log::info!("Exit requested");
                self.should_exit = true;
            }
            Action::ClearCanvas => self.clear_canvas()?,
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::IncreaseBrush => self.adjust_brush(1),
            Action::DecreaseBrush => self.adjust_brush(-1),
            Action::ToggleRandomColor => {
                self.random_color = !self.random_color;
                self.eraser = false;
                log::info!(
                    "Random color {}",
                    if self.random_color { "enabled" } else { "disabled" }
                );
            }
            Action::ToggleDrawMode => {
                self.draw_mode = !self.draw_mode;
                log::info!("Drawing {}", if self.draw_mode { "ON" } else { "OFF" });
            }
            Action::ToggleEraser => {
                self.eraser = !self.eraser;
                if self.eraser {
                    self.random_color = false;
                }
                log::info!("Eraser {}", if self.eraser { "ON" } else { "OFF" });
            }
            Action::SetColorRed => self.set_color(RED),
            Action::SetColorGreen => self.set_color(GREEN),
            Action::SetColorBlue => self.set_color(BLUE),
            Action::SetColorBlack => self.set_color(BLACK),
            Action::SetColorWhite => self.set_color(WHITE),
        }
        Ok(())
    }

    /// Selects a fixed stroke color, leaving random-color and eraser modes.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.random_color = false;
        self.eraser = false;
        log::info!("Color set to {}", util::color_to_name(&color));
    }

    /// Adjusts the brush width by a delta, never going below 1px.
    pub fn adjust_brush(&mut self, delta: i32) {
        self.brush_size = self.brush_size.saturating_add_signed(delta).max(1);
        log::debug!("Brush size {}px", self.brush_size);
    }

    /// Snapshots the canvas, then fills it with the background color.
    ///
    /// Does nothing before the first frame has allocated a canvas.
    pub fn clear_canvas(&mut self) -> Result<(), DrawError> {
        let Some(canvas) = self.canvas.as_mut() else {
            return Ok(());
        };
        self.history.snapshot(canvas)?;
        canvas.fill(BACKGROUND)?;
        log::info!("Canvas cleared");
        Ok(())
    }

    /// Restores the previous canvas state. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let changed = self.history.undo(canvas);
        if changed {
            log::debug!("Undo (depth now {})", self.history.undo_depth());
        }
        changed
    }

    /// Re-applies the most recently undone state. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let changed = self.history.redo(canvas);
        if changed {
            log::debug!("Redo (depth now {})", self.history.redo_depth());
        }
        changed
    }
}
