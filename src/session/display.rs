use super::DisplaySink;
use crate::capture::file::ensure_directory_exists;
use crate::draw::Raster;
use crate::input::FrameOutput;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn present(&mut self, _image: &Raster, _output: &FrameOutput) -> Result<()> {
        Ok(())
    }
}

/// Writes each composited frame as `frame_00000.png`, `frame_00001.png`, ...
#[derive(Debug)]
pub struct PngSequenceSink {
    directory: PathBuf,
    next_index: usize,
}

impl PngSequenceSink {
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        let directory = ensure_directory_exists(&directory)
            .with_context(|| format!("failed to create frames directory {}", directory.display()))?;
        Ok(Self {
            directory,
            next_index: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.next_index
    }
}

impl DisplaySink for PngSequenceSink {
    fn present(&mut self, image: &Raster, _output: &FrameOutput) -> Result<()> {
        let path = self
            .directory
            .join(format!("frame_{:05}.png", self.next_index));
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        image
            .write_png(&mut writer)
            .with_context(|| format!("failed to encode {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed to write {}", path.display()))?;
        self.next_index += 1;
        Ok(())
    }
}
