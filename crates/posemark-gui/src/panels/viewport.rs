use posemark_core::geometry::Size;
use posemark_core::interaction::{CursorHint, PointerEvent};
use posemark_core::render::{Scene, Shape};

use crate::app::PoseMarkApp;
use crate::convert::{color32, to_canvas, to_screen};

pub fn show(ctx: &egui::Context, app: &mut PoseMarkApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            app.session
                .resize_canvas(Size::new(rect.width(), rect.height()));
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());

            if app.session.has_image() {
                handle_pointer(ui, &response, app, rect);
                handle_zoom(ui, &response, app, rect);
                if response.double_clicked() {
                    app.session.reset_view();
                }
                if app.viewport.pointer_inside {
                    ctx.set_cursor_icon(cursor_icon(app.viewport.cursor));
                }
            }

            let scene = app.session.scene();
            paint_scene(ui, rect, &scene, app.viewport.texture.as_ref());

            if !app.session.has_image() {
                show_placeholder(ui, rect);
            } else if app.session.is_loading() {
                draw_loading_label(ui, rect);
            }
        });
}

/// Translate this frame's pointer input into session events.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut PoseMarkApp,
    rect: egui::Rect,
) {
    let (pos, pressed, released) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
        )
    });

    let inside = pos.is_some_and(|p| rect.contains(p));
    let was_inside = app.viewport.pointer_inside;
    app.viewport.pointer_inside = inside;

    if was_inside && !inside {
        dispatch(app, PointerEvent::Leave);
    }

    if let Some(p) = pos.filter(|_| inside) {
        if app.viewport.last_pointer != Some(p) {
            dispatch(app, PointerEvent::Move(to_canvas(rect, p)));
        }
        if pressed && response.hovered() {
            dispatch(app, PointerEvent::Down(to_canvas(rect, p)));
        }
    }
    app.viewport.last_pointer = pos;

    if released {
        dispatch(app, PointerEvent::Up);
    }
}

fn dispatch(app: &mut PoseMarkApp, event: PointerEvent) {
    let response = app.session.pointer(event);
    app.viewport.cursor = response.cursor;
}

fn handle_zoom(ui: &egui::Ui, response: &egui::Response, app: &mut PoseMarkApp, rect: egui::Rect) {
    let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }

    // egui reports wheel-up as positive; the session expects DOM-style
    // deltas where negative zooms in.
    if let Some(pos) = response.hover_pos() {
        app.session.wheel(to_canvas(rect, pos), -scroll_delta);
    }
}

fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Pointer => egui::CursorIcon::PointingHand,
        CursorHint::Grab => egui::CursorIcon::Grab,
        CursorHint::Grabbing => egui::CursorIcon::Grabbing,
    }
}

fn paint_scene(
    ui: &egui::Ui,
    rect: egui::Rect,
    scene: &Scene,
    texture: Option<&egui::TextureHandle>,
) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, color32(scene.background));

    if let (Some((min, max)), Some(texture)) = (scene.image_rect, texture) {
        painter.image(
            texture.id(),
            egui::Rect::from_min_max(to_screen(rect, min), to_screen(rect, max)),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    for shape in &scene.shapes {
        paint_shape(&painter, rect, shape);
    }
}

fn paint_shape(painter: &egui::Painter, rect: egui::Rect, shape: &Shape) {
    match shape {
        Shape::Line {
            from,
            to,
            width,
            color,
        } => {
            painter.line_segment(
                [to_screen(rect, *from), to_screen(rect, *to)],
                egui::Stroke::new(*width, color32(*color)),
            );
        }
        Shape::Circle {
            center,
            radius,
            color,
        } => {
            painter.circle_filled(to_screen(rect, *center), *radius, color32(*color));
        }
        Shape::Text {
            anchor,
            text,
            size,
            color,
            outline,
            outline_width,
        } => {
            let pos = to_screen(rect, *anchor);
            let font = egui::FontId::proportional(*size);
            // Outline by stamping the text around the anchor, then fill on top.
            let w = *outline_width;
            for (dx, dy) in [
                (-w, -w),
                (0.0, -w),
                (w, -w),
                (-w, 0.0),
                (w, 0.0),
                (-w, w),
                (0.0, w),
                (w, w),
            ] {
                painter.text(
                    pos + egui::vec2(dx, dy),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    font.clone(),
                    color32(*outline),
                );
            }
            painter.text(pos, egui::Align2::LEFT_BOTTOM, text, font, color32(*color));
        }
    }
}

fn draw_loading_label(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.left_top() + egui::vec2(8.0, 8.0),
        egui::Align2::LEFT_TOP,
        "Detecting pose...",
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open an image to begin",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}
