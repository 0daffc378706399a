//! Recorded sessions in JSON lines.
//!
//! Each non-empty line describes one frame:
//!
//! ```json
//! {"hand": [[0.5, 0.4, 0.0], ...21 points...], "keys": ["r", "Ctrl+Z"]}
//! ```
//!
//! Points may also be written as `[x, y]`, in which case `z` is 0.
//! `hand` may be `null` or omitted for frames without a hand, and `keys` lists
//! the presses applied after that frame. Lines starting with `#` are comments.

use super::{EventSource, FrameSource, PoseEstimator};
use crate::draw::{BLACK, Raster};
use crate::gesture::{Landmark, LandmarkError, LandmarkSet};
use crate::input::KeyPress;
use serde::Deserialize;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: invalid frame record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: {source}")]
    Landmarks {
        line: usize,
        #[source]
        source: LandmarkError,
    },

    #[error("line {line}: invalid key '{key}': {reason}")]
    Key {
        line: usize,
        key: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RecordedPoint {
    Xyz([f32; 3]),
    Xy([f32; 2]),
}

impl From<RecordedPoint> for Landmark {
    fn from(point: RecordedPoint) -> Self {
        match point {
            RecordedPoint::Xyz([x, y, z]) => Landmark::new(x, y, z),
            RecordedPoint::Xy([x, y]) => Landmark::new(x, y, 0.0),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameRecord {
    #[serde(default)]
    hand: Option<Vec<RecordedPoint>>,
    #[serde(default)]
    keys: Vec<String>,
}

/// One decoded frame of a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayFrame {
    pub hand: Option<LandmarkSet>,
    pub keys: Vec<KeyPress>,
}

/// A parsed recording, ready to be split into session sources.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    frames: Vec<ReplayFrame>,
}

impl Recording {
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path)?;
        let recording = Self::parse(&text)?;
        log::info!(
            "Loaded {} recorded frames from {}",
            recording.len(),
            path.display()
        );
        Ok(recording)
    }

    pub fn parse(text: &str) -> Result<Self, ReplayError> {
        let mut frames = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let record: FrameRecord = serde_json::from_str(trimmed)
                .map_err(|source| ReplayError::Json { line, source })?;

            let hand = match record.hand {
                Some(points) => {
                    let points: Vec<Landmark> = points.into_iter().map(Landmark::from).collect();
                    let set = LandmarkSet::try_from(points)
                        .map_err(|source| ReplayError::Landmarks { line, source })?;
                    Some(set)
                }
                None => None,
            };

            let keys = record
                .keys
                .into_iter()
                .map(|key| {
                    key.parse::<KeyPress>()
                        .map_err(|reason| ReplayError::Key { line, key, reason })
                })
                .collect::<Result<Vec<_>, _>>()?;

            frames.push(ReplayFrame { hand, keys });
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    /// Splits the recording into a frame source of blank `width` x `height`
    /// frames, an estimator and an event source that advance in lockstep.
    pub fn into_sources(
        self,
        width: u32,
        height: u32,
    ) -> (ReplayFrameSource, ReplayEstimator, ReplayEvents) {
        let count = self.frames.len();
        let mut hands = VecDeque::with_capacity(count);
        let mut keys = VecDeque::with_capacity(count);
        for frame in self.frames {
            hands.push_back(frame.hand);
            keys.push_back(frame.keys);
        }
        (
            ReplayFrameSource::new(width, height, count),
            ReplayEstimator { hands },
            ReplayEvents { keys },
        )
    }
}

/// Produces a fixed number of black frames.
#[derive(Debug, Clone)]
pub struct ReplayFrameSource {
    width: u32,
    height: u32,
    remaining: usize,
}

impl ReplayFrameSource {
    pub fn new(width: u32, height: u32, count: usize) -> Self {
        Self {
            width,
            height,
            remaining: count,
        }
    }
}

impl FrameSource for ReplayFrameSource {
    fn next_frame(&mut self) -> Option<Raster> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        match Raster::filled(self.width, self.height, BLACK) {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::error!("Cannot allocate replay frame: {}", err);
                None
            }
        }
    }
}

/// Returns the recorded hand for each frame in order.
#[derive(Debug, Clone, Default)]
pub struct ReplayEstimator {
    hands: VecDeque<Option<LandmarkSet>>,
}

impl PoseEstimator for ReplayEstimator {
    fn estimate(&mut self, _frame: &Raster) -> Option<LandmarkSet> {
        self.hands.pop_front().flatten()
    }
}

/// Returns the recorded key presses for each frame in order.
#[derive(Debug, Clone, Default)]
pub struct ReplayEvents {
    keys: VecDeque<Vec<KeyPress>>,
}

impl EventSource for ReplayEvents {
    fn poll(&mut self) -> Vec<KeyPress> {
        self.keys.pop_front().unwrap_or_default()
    }
}
