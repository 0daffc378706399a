//! Stroke rasterization onto the canvas.

use super::color::Color;
use super::error::DrawError;
use super::raster::Raster;

/// Raster-space pixel coordinate.
pub type Point = (i32, i32);

/// Draws a straight segment from `from` to `to` directly into `canvas`.
///
/// Segments use round caps and joins, so a zero-length segment still leaves
/// a dot of diameter `width`. Coordinates are pixel indices; the path runs
/// through pixel centers. Erasing is this same call with the background color.
pub fn draw_segment(
    canvas: &mut Raster,
    from: Point,
    to: Point,
    color: Color,
    width: u32,
) -> Result<(), DrawError> {
    let ctx = canvas.context()?;
    color.apply(&ctx);
    ctx.set_line_width(width.max(1) as f64);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0 as f64 + 0.5, from.1 as f64 + 0.5);
    ctx.line_to(to.0 as f64 + 0.5, to.1 as f64 + 0.5);
    ctx.stroke()?;
    Ok(())
}
