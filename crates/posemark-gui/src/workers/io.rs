use std::path::Path;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use ab_glyph::FontArc;
use posemark_core::io::load_image;
use posemark_core::render::export::{render_export, save_export, ExportRequest};

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    send(
        tx,
        ctx,
        WorkerResult::Decoding {
            path: path.to_path_buf(),
        },
    );
    match load_image(path) {
        Ok(image) => send(
            tx,
            ctx,
            WorkerResult::ImageLoaded {
                image: Arc::new(image),
            },
        ),
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::ImageFailed {
                message: format!("Failed to open {}: {e}", path.display()),
            },
        ),
    }
}

pub(super) fn handle_export(
    request: &ExportRequest,
    path: &Path,
    jpeg_quality: u8,
    font: Option<FontArc>,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    if font.is_none() && request.flags.show_labels && request.flags.show_skeleton {
        send_log(tx, ctx, "No label font available, exporting without labels");
    }

    let pixels = render_export(request, font);
    match save_export(&pixels, request.kind, jpeg_quality, path) {
        Ok(()) => {
            tracing::info!(
                "Exported {} in {:.0}ms",
                request.kind,
                start.elapsed().as_secs_f32() * 1000.0
            );
            send(
                tx,
                ctx,
                WorkerResult::Exported {
                    path: path.to_path_buf(),
                    kind: request.kind,
                },
            );
        }
        Err(e) => send_error(tx, ctx, format!("Failed to export {}: {e}", request.kind)),
    }
}
