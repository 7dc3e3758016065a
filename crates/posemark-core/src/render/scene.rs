use crate::geometry::{Point, Size};
use crate::viewport::Viewport;

use super::{build_overlay, Color, OverlayInput, Shape};

/// One frame of the interactive canvas, in canvas-local screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas_size: Size,
    pub background: Color,
    /// Screen rectangle (min, max) the image occupies, if an image is loaded.
    pub image_rect: Option<(Point, Point)>,
    pub shapes: Vec<Shape>,
}

/// Lay out the live canvas: background, then the image under the viewport,
/// then overlays. Without an image only the background is drawn.
pub fn interactive_scene(
    canvas_size: Size,
    viewport: &Viewport,
    overlay: Option<OverlayInput<'_>>,
) -> Scene {
    let Some(overlay) = overlay else {
        return Scene {
            canvas_size,
            background: Color::CANVAS,
            image_rect: None,
            shapes: Vec::new(),
        };
    };

    let image = overlay.image_size;
    let min = viewport.world_to_screen(Point::ZERO);
    let max = viewport.world_to_screen(Point::new(image.width, image.height));

    Scene {
        canvas_size,
        background: Color::CANVAS,
        image_rect: Some((min, max)),
        shapes: build_overlay(overlay, viewport),
    }
}
