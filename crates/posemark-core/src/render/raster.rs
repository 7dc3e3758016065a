use std::path::Path;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut, draw_text_mut,
};
use tracing::warn;

use crate::error::{PoseMarkError, Result};
use crate::geometry::Point;

use super::{Color, Shape};

/// Shape coordinates are kept within this many surface sizes of the origin.
const DRAW_BOUND_FACTOR: f32 = 4.0;

/// Load a TrueType/OpenType font for label rendering.
pub fn load_font(path: &Path) -> Result<FontArc> {
    let bytes = std::fs::read(path)?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| PoseMarkError::Font(format!("{}: {e}", path.display())))
}

/// Parse an in-memory font, e.g. one bundled with the UI toolkit.
pub fn font_from_bytes(bytes: Vec<u8>) -> Result<FontArc> {
    FontArc::try_from_vec(bytes).map_err(|e| PoseMarkError::Font(e.to_string()))
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba([color.0, color.1, color.2, 255])
}

/// Offscreen RGBA surface that [`Shape`]s are rasterized into.
pub struct RasterCanvas {
    pixels: RgbaImage,
    font: Option<FontArc>,
    warned_no_font: bool,
}

impl RasterCanvas {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            font: None,
            warned_no_font: false,
        }
    }

    pub fn with_font(mut self, font: Option<FontArc>) -> Self {
        self.font = font;
        self
    }

    pub fn fill(&mut self, color: Color) {
        let px = rgba(color);
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    pub fn draw(&mut self, shapes: &[Shape]) {
        for shape in shapes {
            match shape {
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => self.line(*from, *to, *width, *color),
                Shape::Circle {
                    center,
                    radius,
                    color,
                } => {
                    let r = radius.round().max(1.0) as i32;
                    let center = self.clamp(*center);
                    draw_filled_circle_mut(
                        &mut self.pixels,
                        (center.x.round() as i32, center.y.round() as i32),
                        r,
                        rgba(*color),
                    );
                }
                Shape::Text {
                    anchor,
                    text,
                    size,
                    color,
                    outline,
                    outline_width,
                } => self.text(*anchor, text, *size, *color, *outline, *outline_width),
            }
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Pull `p` into a band around the surface. Far-off coordinates would
    /// overflow imageproc's integer rasterizers.
    fn clamp(&self, p: Point) -> Point {
        let bound = self.pixels.width().max(self.pixels.height()) as f32 * DRAW_BOUND_FACTOR;
        let c = |v: f32| if v.is_nan() { 0.0 } else { v.clamp(-bound, bound) };
        Point::new(c(p.x), c(p.y))
    }

    /// Thick lines are filled quads; hairlines and degenerate quads fall back
    /// to a plain segment.
    fn line(&mut self, from: Point, to: Point, width: f32, color: Color) {
        let (from, to) = (self.clamp(from), self.clamp(to));
        let px = rgba(color);
        let len = from.distance(to);
        if width <= 1.0 || len < f32::EPSILON {
            draw_line_segment_mut(&mut self.pixels, (from.x, from.y), (to.x, to.y), px);
            return;
        }

        let d = to - from;
        let n = Point::new(-d.y / len, d.x / len) * (width / 2.0);
        let corners = [from + n, to + n, to - n, from - n]
            .map(|p| imageproc::point::Point::new(p.x.round() as i32, p.y.round() as i32));

        if corners[0] == corners[3] || corners[1] == corners[2] {
            draw_line_segment_mut(&mut self.pixels, (from.x, from.y), (to.x, to.y), px);
        } else {
            draw_polygon_mut(&mut self.pixels, &corners, px);
        }
    }

    fn text(
        &mut self,
        anchor: Point,
        text: &str,
        size: f32,
        color: Color,
        outline: Color,
        outline_width: f32,
    ) {
        let Some(ref font) = self.font else {
            if !self.warned_no_font {
                warn!("No font available, labels are not rendered");
                self.warned_no_font = true;
            }
            return;
        };

        let anchor = self.clamp(anchor);
        let scale = PxScale::from(size);
        let ascent = font.as_scaled(scale).ascent();
        let x = anchor.x.round() as i32;
        let y = (anchor.y - ascent).round() as i32;

        let o = (outline_width / 2.0).round().max(1.0) as i32;
        for (dx, dy) in [(-o, -o), (0, -o), (o, -o), (-o, 0), (o, 0), (-o, o), (0, o), (o, o)] {
            draw_text_mut(&mut self.pixels, rgba(outline), x + dx, y + dy, scale, font, text);
        }
        draw_text_mut(&mut self.pixels, rgba(color), x, y, scale, font, text);
    }
}
