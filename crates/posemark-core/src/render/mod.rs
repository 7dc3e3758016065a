//! Overlay rendering shared by the interactive canvas and flattened export.
//!
//! [`build_overlay`] is the only place overlay geometry is decided. Both paths
//! call it, the live canvas with the current viewport and export with the
//! identity viewport, so what is exported matches what was edited.

pub mod export;
mod raster;
mod scene;

use serde::{Deserialize, Serialize};

use crate::consts::{
    FULL_POSE_LINE_WIDTH, FULL_POSE_POINT_RADIUS, LABEL_FONT_SIZE, LABEL_OFFSET,
    LABEL_OUTLINE_WIDTH, LANDMARK_RADIUS, SKELETON_LINE_WIDTH,
};
use crate::geometry::{Point, Size};
use crate::landmarks::LandmarkSet;
use crate::provider::RawPose;
use crate::viewport::Viewport;

pub use raster::{font_from_bytes, load_font, RasterCanvas};
pub use scene::{interactive_scene, Scene};

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLACK: Color = Color(0, 0, 0);
    /// Canvas background behind the image.
    pub const CANVAS: Color = Color(0x33, 0x33, 0x33);
}

/// Which overlays are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayFlags {
    pub show_skeleton: bool,
    pub show_labels: bool,
    pub show_full_pose: bool,
}

impl Default for OverlayFlags {
    fn default() -> Self {
        Self {
            show_skeleton: true,
            show_labels: true,
            show_full_pose: false,
        }
    }
}

/// A drawing primitive in output pixels (screen for the live canvas, image
/// pixels for export).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Color,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// `anchor` is the left end of the text baseline.
    Text {
        anchor: Point,
        text: String,
        size: f32,
        color: Color,
        outline: Color,
        outline_width: f32,
    },
}

/// Everything the overlay depends on apart from the transform.
#[derive(Clone, Copy, Debug)]
pub struct OverlayInput<'a> {
    pub landmarks: &'a LandmarkSet,
    pub raw_pose: Option<&'a RawPose>,
    pub image_size: Size,
    pub flags: OverlayFlags,
}

/// Build overlay shapes for `input` under `viewport`.
///
/// Positions go through the viewport; stroke widths, radii and font sizes are
/// fixed in output pixels, which is the same as dividing world-space sizes by
/// the current scale. Overlays therefore keep a constant on-screen size at
/// any zoom, and at the identity transform they come out at their nominal
/// pixel sizes.
pub fn build_overlay(input: OverlayInput<'_>, viewport: &Viewport) -> Vec<Shape> {
    let mut shapes = Vec::new();
    let to_screen = |p: Point| viewport.world_to_screen(p);

    if input.flags.show_full_pose {
        if let Some(raw) = input.raw_pose {
            shapes.extend(raw.visible_segments(input.image_size).map(|(a, b)| {
                Shape::Line {
                    from: to_screen(a),
                    to: to_screen(b),
                    width: FULL_POSE_LINE_WIDTH,
                    color: Color::GREEN,
                }
            }));
            shapes.extend(raw.visible_points(input.image_size).map(|p| Shape::Circle {
                center: to_screen(p),
                radius: FULL_POSE_POINT_RADIUS,
                color: Color::RED,
            }));
        }
    }

    if input.flags.show_skeleton {
        shapes.extend(input.landmarks.skeleton_segments().map(|(a, b)| Shape::Line {
            from: to_screen(a),
            to: to_screen(b),
            width: SKELETON_LINE_WIDTH,
            color: Color::GREEN,
        }));

        for landmark in input.landmarks {
            let center = to_screen(landmark.position());
            shapes.push(Shape::Circle {
                center,
                radius: LANDMARK_RADIUS,
                color: Color::RED,
            });
            if input.flags.show_labels {
                shapes.push(Shape::Text {
                    anchor: Point::new(center.x + LABEL_OFFSET, center.y),
                    text: landmark.name.clone(),
                    size: LABEL_FONT_SIZE,
                    color: Color::WHITE,
                    outline: Color::BLACK,
                    outline_width: LABEL_OUTLINE_WIDTH,
                });
            }
        }
    }

    shapes
}
