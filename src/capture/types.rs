//! Data types for saving the canvas.

use crate::draw::DrawError;
use std::path::PathBuf;
use thiserror::Error;

/// Result of one thumbs-up save attempt, as reported to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The canvas was written to this path.
    Saved(PathBuf),
    /// The sink refused or failed; the session carries on.
    Failed(String),
}

/// Errors that can occur while persisting the canvas.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to save drawing: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] DrawError),
}
