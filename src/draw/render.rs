//! Cairo-based compositing and overlays for the output frame.

use super::color::{Color, RED, WHITE, YELLOW};
use super::error::DrawError;
use super::raster::Raster;
use crate::gesture::{Landmark, LandmarkSet};
use crate::gesture::landmarks::HAND_CONNECTIONS;
use cairo::{FontSlant, FontWeight, Operator};

// ============================================================================
// HUD Layout Constants (not configurable)
// ============================================================================

/// Color preview swatch, top-left corner and side length
const SWATCH_X: f64 = 10.0;
const SWATCH_Y: f64 = 50.0;
const SWATCH_SIZE: f64 = 51.0;
/// Left margin and first baseline of the HUD text block
const HUD_TEXT_X: f64 = 10.0;
const HUD_TEXT_Y: f64 = 130.0;
const HUD_LINE_HEIGHT: f64 = 30.0;
const HUD_FONT_SIZE: f64 = 16.0;
/// Gesture line color (amber)
const GESTURE_TEXT_COLOR: Color = Color {
    r: 1.0,
    g: 0.78,
    b: 0.0,
    a: 1.0,
};

/// Landmark overlay stroke width and joint radius
const LANDMARK_LINE_WIDTH: f64 = 2.0;
const LANDMARK_JOINT_RADIUS: f64 = 2.0;

/// Adds `canvas` onto a copy of `frame` with saturating per-channel addition.
///
/// A black canvas pixel leaves the video untouched; drawn pixels brighten it.
/// The canvas is anchored at the top-left corner; any size mismatch clips.
pub fn composite(frame: &Raster, canvas: &Raster) -> Result<Raster, DrawError> {
    let mut out = frame.try_clone()?;
    let ctx = out.context()?;
    ctx.set_operator(Operator::Add);
    ctx.set_source_surface(canvas.surface(), 0.0, 0.0)?;
    ctx.paint()?;
    drop(ctx);
    Ok(out)
}

/// What the HUD shows for one frame.
#[derive(Debug, Clone, Copy)]
pub struct HudStatus<'a> {
    pub preview_color: Color,
    pub brush_size: u32,
    pub eraser: bool,
    pub draw_mode: bool,
    pub gesture_text: Option<&'a str>,
}

/// Draws the color swatch and status lines onto `out`.
pub fn render_hud(out: &mut Raster, status: &HudStatus<'_>) -> Result<(), DrawError> {
    let ctx = out.context()?;

    status.preview_color.apply(&ctx);
    ctx.rectangle(SWATCH_X, SWATCH_Y, SWATCH_SIZE, SWATCH_SIZE);
    ctx.fill()?;

    ctx.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
    ctx.set_font_size(HUD_FONT_SIZE);

    let mut lines = vec![
        (format!("Brush: {}px", status.brush_size), WHITE),
        (
            if status.eraser { "Eraser" } else { "Color" }.to_string(),
            WHITE,
        ),
        (
            format!("Drawing: {}", if status.draw_mode { "ON" } else { "OFF" }),
            YELLOW,
        ),
    ];
    if let Some(text) = status.gesture_text {
        lines.push((text.to_string(), GESTURE_TEXT_COLOR));
    }

    for (i, (text, color)) in lines.iter().enumerate() {
        color.apply(&ctx);
        ctx.move_to(HUD_TEXT_X, HUD_TEXT_Y + i as f64 * HUD_LINE_HEIGHT);
        // Missing fonts drop the label only.
        if let Err(err) = ctx.show_text(text) {
            log::debug!("HUD text '{}' not rendered: {}", text, err);
        }
    }

    Ok(())
}

/// Draws the hand skeleton onto `frame`.
pub fn render_landmarks(frame: &mut Raster, hand: &LandmarkSet) -> Result<(), DrawError> {
    let (width, height) = frame.size();
    let ctx = frame.context()?;
    RED.apply(&ctx);
    ctx.set_line_width(LANDMARK_LINE_WIDTH);

    let to_xy = |lm: Landmark| (lm.x as f64 * width as f64, lm.y as f64 * height as f64);

    for &(a, b) in HAND_CONNECTIONS.iter() {
        let (x1, y1) = to_xy(hand.point(a));
        let (x2, y2) = to_xy(hand.point(b));
        ctx.move_to(x1, y1);
        ctx.line_to(x2, y2);
    }
    ctx.stroke()?;

    for &lm in hand.points() {
        let (x, y) = to_xy(lm);
        ctx.new_sub_path();
        ctx.arc(x, y, LANDMARK_JOINT_RADIUS, 0.0, std::f64::consts::PI * 2.0);
    }
    ctx.fill()?;

    Ok(())
}
