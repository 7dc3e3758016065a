use image::RgbaImage;
use posemark_core::geometry::Point;
use posemark_core::render::Color;

/// Convert decoded RGBA pixels to an egui ColorImage.
pub fn rgba_to_color_image(pixels: &RgbaImage) -> egui::ColorImage {
    let size = [pixels.width() as usize, pixels.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}

pub fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.0, color.1, color.2)
}

/// Canvas-local point to an absolute position inside `rect`.
pub fn to_screen(rect: egui::Rect, p: Point) -> egui::Pos2 {
    egui::pos2(rect.min.x + p.x, rect.min.y + p.y)
}

/// Absolute position to a canvas-local point relative to `rect`.
pub fn to_canvas(rect: egui::Rect, pos: egui::Pos2) -> Point {
    Point::new(pos.x - rect.min.x, pos.y - rect.min.y)
}
