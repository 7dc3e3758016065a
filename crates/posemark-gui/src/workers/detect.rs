use std::sync::mpsc;

use posemark_core::io::SourceImage;
use posemark_core::provider::PoseDetector;
use posemark_core::session::DetectionTicket;

use crate::messages::WorkerResult;

use super::send;

/// Run the ticket's provider on `image`. Provider initialization happens on
/// first use, here on the worker, so the UI stays responsive.
pub(super) fn handle_detect(
    ticket: DetectionTicket,
    image: &SourceImage,
    detector: &mut PoseDetector,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let result = detector
        .select(ticket.model)
        .and_then(|()| detector.detect(image));
    send(tx, ctx, WorkerResult::Detection { ticket, result });
}
