//! Per-frame decision: classify the hand, update the canvas, build the output.

use crate::capture::{PersistenceSink, SaveOutcome};
use crate::draw::{
    DrawError, HudStatus, Raster, composite, draw_segment, render_hud, render_landmarks,
};
use crate::gesture::classifier::classify_hand;
use crate::gesture::{Gesture, LandmarkSet};

use super::{DrawingMachine, DrawingState};

/// Gesture line shown while the open palm forces the eraser.
pub const ERASER_TEXT: &str = "Eraser (Open Palm)";
/// Gesture line shown on the frame a save fires.
pub const SAVED_TEXT: &str = "Saved (Thumbs Up)";
/// Gesture line shown when the sink rejected a save.
pub const SAVE_FAILED_TEXT: &str = "Save failed";

/// Everything the display needs for one processed frame.
#[derive(Debug)]
pub struct FrameOutput {
    /// Video frame plus canvas, with overlays
    pub image: Raster,
    pub gesture: Gesture,
    pub state: DrawingState,
    pub gesture_text: Option<&'static str>,
    /// Set only on frames where the save gate fired
    pub save: Option<SaveOutcome>,
}

impl DrawingMachine {
    /// Advances the session by one video frame.
    ///
    /// `hand` is the landmark set detected in `frame` (already mirrored when
    /// the camera is mirrored). A failing `sink` is reported in the output and
    /// never aborts the session.
    pub fn process_frame(
        &mut self,
        frame: &Raster,
        hand: Option<&LandmarkSet>,
        sink: &mut dyn PersistenceSink,
    ) -> Result<FrameOutput, DrawError> {
        let (width, height) = frame.size();
        self.ensure_canvas((width, height))?;

        let mut gesture = Gesture::None;
        let mut gesture_text = None;
        let mut save = None;
        let mut eraser = self.eraser;

        let state = match hand {
            None => {
                self.prev_pointer = None;
                self.save_gate.reset();
                DrawingState::NoHand
            }
            Some(hand) => {
                let classification = classify_hand(hand, width, height);
                gesture = classification.gesture;
                let current = classification.pointer;

                // An open palm neither fires nor rearms the save gate.
                let fired = match gesture {
                    Gesture::ThumbsUp => self.save_gate.evaluate(true),
                    Gesture::None => self.save_gate.evaluate(false),
                    Gesture::OpenPalm => {
                        eraser = true;
                        gesture_text = Some(ERASER_TEXT);
                        false
                    }
                };
                if fired {
                    let outcome = self.save(sink);
                    gesture_text = Some(match outcome {
                        SaveOutcome::Saved(_) => SAVED_TEXT,
                        SaveOutcome::Failed(_) => SAVE_FAILED_TEXT,
                    });
                    save = Some(outcome);
                }

                let state = if self.draw_mode && gesture != Gesture::ThumbsUp {
                    let from = self.prev_pointer.unwrap_or(current);
                    let color = self.stroke_color(eraser);
                    let brush = self.brush_size;
                    let painted_eraser = eraser && !self.random_color;
                    if let Some(canvas) = self.canvas.as_mut() {
                        self.history.snapshot(canvas)?;
                        draw_segment(canvas, from, current, color, brush)?;
                    }
                    if painted_eraser {
                        DrawingState::Erasing
                    } else {
                        DrawingState::Drawing
                    }
                } else if fired {
                    DrawingState::SaveTriggered
                } else {
                    DrawingState::Idle
                };

                self.prev_pointer = Some(current);
                state
            }
        };
        self.state = state;

        let image = self.render_output(frame, hand, eraser, gesture_text)?;

        Ok(FrameOutput {
            image,
            gesture,
            state,
            gesture_text,
            save,
        })
    }

    fn save(&mut self, sink: &mut dyn PersistenceSink) -> SaveOutcome {
        let Some(canvas) = self.canvas.as_ref() else {
            return SaveOutcome::Failed("no canvas allocated".to_string());
        };
        match sink.save(canvas) {
            Ok(path) => {
                log::info!("Drawing saved to {}", path.display());
                SaveOutcome::Saved(path)
            }
            Err(err) => {
                log::error!("Failed to save drawing: {}", err);
                SaveOutcome::Failed(err.to_string())
            }
        }
    }

    fn render_output(
        &mut self,
        frame: &Raster,
        hand: Option<&LandmarkSet>,
        eraser: bool,
        gesture_text: Option<&'static str>,
    ) -> Result<Raster, DrawError> {
        let mut video = frame.try_clone()?;
        if self.show_landmarks
            && let Some(hand) = hand
        {
            render_landmarks(&mut video, hand)?;
        }

        let mut image = match self.canvas.as_ref() {
            Some(canvas) => composite(&video, canvas)?,
            None => video,
        };

        if self.show_hud {
            let status = HudStatus {
                preview_color: self.preview_color(eraser),
                brush_size: self.brush_size,
                eraser,
                draw_mode: self.draw_mode,
                gesture_text,
            };
            render_hud(&mut image, &status)?;
        }

        Ok(image)
    }
}
