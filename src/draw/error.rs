//! Error type for raster operations.

use thiserror::Error;

/// Errors that can occur while allocating, drawing into, or encoding a raster.
#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Raster data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
}
