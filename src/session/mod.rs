//! Per-frame session loop and the boundaries it talks to.
//!
//! A session pulls frames from a [`FrameSource`], asks a [`PoseEstimator`]
//! for the hand, feeds both to the [`DrawingMachine`], shows the result on a
//! [`DisplaySink`] and finally applies the key presses an [`EventSource`]
//! collected during the frame. Camera, pose model and window are all behind
//! these traits; the crate ships a replay implementation of each.

mod display;
mod replay;

pub use display::{NullDisplay, PngSequenceSink};
pub use replay::{
    Recording, ReplayError, ReplayEstimator, ReplayEvents, ReplayFrame, ReplayFrameSource,
};

use crate::capture::{PersistenceSink, SaveOutcome};
use crate::draw::{DrawError, Raster};
use crate::gesture::LandmarkSet;
use crate::input::{DrawingMachine, FrameOutput, KeyPress};
use std::path::PathBuf;

/// Supplies video frames. `None` ends the session.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Raster>;
}

/// Detects at most one hand in a frame.
pub trait PoseEstimator {
    fn estimate(&mut self, frame: &Raster) -> Option<LandmarkSet>;
}

/// Shows each composited frame. Errors are logged and the session goes on.
pub trait DisplaySink {
    fn present(&mut self, image: &Raster, output: &FrameOutput) -> anyhow::Result<()>;
}

/// Discrete input gathered since the previous poll.
pub trait EventSource {
    fn poll(&mut self) -> Vec<KeyPress>;
}

/// What happened over a whole session.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub frames: usize,
    pub saved: Vec<PathBuf>,
    pub failed_saves: usize,
    /// Whether the loop stopped because of the exit action
    pub exited: bool,
    /// Composited output of the final frame
    pub last_image: Option<Raster>,
}

/// One run of the frame loop, wired to its collaborators.
pub struct Session<'a> {
    pub frames: &'a mut dyn FrameSource,
    pub estimator: &'a mut dyn PoseEstimator,
    pub display: &'a mut dyn DisplaySink,
    pub persistence: &'a mut dyn PersistenceSink,
    pub events: &'a mut dyn EventSource,
    /// Flip every frame horizontally before pose estimation
    pub mirror_input: bool,
}

impl Session<'_> {
    /// Runs until the frame source is exhausted or the exit action fires.
    pub fn run(&mut self, machine: &mut DrawingMachine) -> Result<SessionSummary, DrawError> {
        let mut summary = SessionSummary::default();

        while !machine.should_exit() {
            let Some(raw) = self.frames.next_frame() else {
                log::debug!("Frame source exhausted");
                break;
            };
            let frame = if self.mirror_input {
                raw.mirrored()?
            } else {
                raw
            };

            let hand = self.estimator.estimate(&frame);
            let output = machine.process_frame(&frame, hand.as_ref(), self.persistence)?;
            summary.frames += 1;
            match &output.save {
                Some(SaveOutcome::Saved(path)) => summary.saved.push(path.clone()),
                Some(SaveOutcome::Failed(_)) => summary.failed_saves += 1,
                None => {}
            }

            if let Err(err) = self.display.present(&output.image, &output) {
                log::warn!("Failed to present frame {}: {:#}", summary.frames, err);
            }
            summary.last_image = Some(output.image);

            for press in self.events.poll() {
                machine.on_key_press(press)?;
                if machine.should_exit() {
                    break;
                }
            }
        }

        summary.exited = machine.should_exit();
        log::info!(
            "Session finished after {} frames ({} saved, {} failed saves)",
            summary.frames,
            summary.saved.len(),
            summary.failed_saves
        );
        Ok(summary)
    }
}
