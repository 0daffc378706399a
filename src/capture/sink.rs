use super::file::{self, FileSaveConfig};
use super::types::CaptureError;
use crate::draw::Raster;
use std::path::PathBuf;

/// Destination for canvases saved by the thumbs-up gesture.
pub trait PersistenceSink {
    fn save(&mut self, canvas: &Raster) -> Result<PathBuf, CaptureError>;
}

/// Writes each saved canvas to a timestamped PNG file.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    config: FileSaveConfig,
}

impl FileSink {
    pub fn new(config: FileSaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileSaveConfig {
        &self.config
    }
}

impl PersistenceSink for FileSink {
    fn save(&mut self, canvas: &Raster) -> Result<PathBuf, CaptureError> {
        file::save_canvas(canvas, &self.config)
    }
}
