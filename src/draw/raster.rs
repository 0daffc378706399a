//! Fixed-size pixel raster backed by a Cairo image surface.
//!
//! The same type carries incoming video frames, the persistent drawing
//! canvas, its history snapshots, and the composited output frame.

use super::color::Color;
use super::error::DrawError;
use cairo::{Antialias, Context, Filter, Format, ImageSurface, Operator, SurfacePattern};
use std::io::Write;

/// An opaque ARGB32 raster.
///
/// Pixel data lives in a Cairo [`ImageSurface`]. Drawing contexts are created
/// per operation and dropped immediately, so the surface is never shared.
#[derive(Debug)]
pub struct Raster {
    surface: ImageSurface,
}

impl Raster {
    /// Allocates a raster filled with opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self, DrawError> {
        Self::filled(width, height, super::color::BLACK)
    }

    /// Allocates a raster filled with the given color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, DrawError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(DrawError::InvalidSize { width, height });
        }

        let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)?;
        let mut raster = Self { surface };
        raster.fill(color)?;
        Ok(raster)
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Underlying Cairo surface, for use as a paint source.
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Creates a drawing context with antialiasing disabled so strokes land
    /// on whole pixels.
    pub(crate) fn context(&mut self) -> Result<Context, DrawError> {
        let ctx = Context::new(&self.surface)?;
        ctx.set_antialias(Antialias::None);
        Ok(ctx)
    }

    /// Replaces every pixel with `color`.
    pub fn fill(&mut self, color: Color) -> Result<(), DrawError> {
        let ctx = self.context()?;
        ctx.set_operator(Operator::Source);
        color.apply(&ctx);
        ctx.paint()?;
        Ok(())
    }

    /// Returns an independent copy with identical pixel data.
    pub fn try_clone(&self) -> Result<Self, DrawError> {
        let mut copy = Self {
            surface: ImageSurface::create(Format::ARgb32, self.surface.width(), self.surface.height())?,
        };
        let ctx = copy.context()?;
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
        ctx.paint()?;
        drop(ctx);
        Ok(copy)
    }

    /// Returns a horizontally flipped copy (selfie view).
    pub fn mirrored(&self) -> Result<Self, DrawError> {
        let mut copy = Self {
            surface: ImageSurface::create(Format::ARgb32, self.surface.width(), self.surface.height())?,
        };
        let ctx = copy.context()?;
        ctx.translate(self.surface.width() as f64, 0.0);
        ctx.scale(-1.0, 1.0);
        ctx.set_operator(Operator::Source);
        let pattern = SurfacePattern::create(&self.surface);
        pattern.set_filter(Filter::Nearest);
        ctx.set_source(&pattern)?;
        ctx.paint()?;
        drop(ctx);
        Ok(copy)
    }

    /// Reads the RGB value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.surface.width() || y >= self.surface.height() {
            return None;
        }

        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut value = None;
        self.surface
            .with_data(|data| {
                let bytes = [
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ];
                let argb = u32::from_ne_bytes(bytes);
                value = Some([(argb >> 16) as u8, (argb >> 8) as u8, argb as u8]);
            })
            .ok()?;
        value
    }

    /// Copies out the raw surface bytes (stride-padded, native-endian ARGB32).
    pub fn to_bytes(&self) -> Result<Vec<u8>, DrawError> {
        let mut bytes = Vec::new();
        self.surface.with_data(|data| bytes.extend_from_slice(data))?;
        Ok(bytes)
    }

    /// True when both rasters have the same size and bit-identical pixels.
    pub fn same_pixels(&self, other: &Raster) -> bool {
        if self.size() != other.size() {
            return false;
        }
        match (self.to_bytes(), other.to_bytes()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// True when every pixel equals `color`.
    pub fn is_filled_with(&self, color: Color) -> bool {
        let [r, g, b] = color.to_rgb8();
        let expected = 0xFF00_0000u32 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
        let width = self.surface.width() as usize;
        let stride = self.surface.stride() as usize;
        let Ok(bytes) = self.to_bytes() else {
            return false;
        };
        bytes.chunks(stride).all(|row| {
            row[..width * 4]
                .chunks_exact(4)
                .all(|px| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]) == expected)
        })
    }

    /// Encodes the raster as PNG into `stream`.
    pub fn write_png<W: Write>(&self, stream: &mut W) -> Result<(), DrawError> {
        self.surface.write_to_png(stream)?;
        Ok(())
    }
}
