use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SCALE, MIN_SCALE, ZOOM_STEP};
use crate::geometry::{Point, Size};

/// Direction of a single discrete zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a wheel delta to a zoom direction. Scrolling up (negative delta)
    /// zooms in; a zero delta carries no direction.
    pub fn from_wheel_delta(delta_y: f32) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::In)
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }

    fn factor(self) -> f32 {
        match self {
            Self::In => 1.0 + ZOOM_STEP,
            Self::Out => 1.0 - ZOOM_STEP,
        }
    }
}

/// Affine world↔screen mapping: `screen = world * scale + translate`.
///
/// World space is original image pixels; screen space is canvas pixels with
/// the origin at the canvas' top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity()
    }
}

impl Viewport {
    /// Scale 1, no translation. Used for viewport-independent export.
    pub const fn identity() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }

    /// Fit the whole image inside the canvas without cropping and center it.
    pub fn fit_to_image(image: Size, canvas: Size) -> Self {
        if image.is_degenerate() || canvas.is_degenerate() {
            return Self::identity();
        }

        let fit_x = canvas.width / image.width;
        let fit_y = canvas.height / image.height;
        let scale = fit_x.min(fit_y).clamp(MIN_SCALE, MAX_SCALE);

        Self {
            scale,
            translate_x: (canvas.width - image.width * scale) / 2.0,
            translate_y: (canvas.height - image.height * scale) / 2.0,
        }
    }

    pub fn translation(&self) -> Point {
        Point::new(self.translate_x, self.translate_y)
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        world * self.scale + self.translation()
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        (screen - self.translation()) / self.scale
    }

    /// Zoom one step toward `pointer` (screen space), keeping the world point
    /// under the pointer fixed on screen. Steps that would leave the allowed
    /// scale range return the viewport unchanged.
    pub fn zoom_at(&self, pointer: Point, direction: ZoomDirection) -> Self {
        let new_scale = self.scale * direction.factor();
        if !(MIN_SCALE..=MAX_SCALE).contains(&new_scale) {
            return *self;
        }

        let ratio = new_scale / self.scale;
        Self {
            scale: new_scale,
            translate_x: pointer.x - (pointer.x - self.translate_x) * ratio,
            translate_y: pointer.y - (pointer.y - self.translate_y) * ratio,
        }
    }

    /// Wheel convenience over [`Viewport::zoom_at`]; only the sign of
    /// `delta_y` matters.
    pub fn zoom_from_wheel(&self, pointer: Point, delta_y: f32) -> Self {
        match ZoomDirection::from_wheel_delta(delta_y) {
            Some(direction) => self.zoom_at(pointer, direction),
            None => *self,
        }
    }

    pub fn pan_by(&self, delta: Point) -> Self {
        Self {
            translate_x: self.translate_x + delta.x,
            translate_y: self.translate_y + delta.y,
            ..*self
        }
    }

    pub fn pan_to(&self, translation: Point) -> Self {
        Self {
            translate_x: translation.x,
            translate_y: translation.y,
            ..*self
        }
    }
}
