use std::path::PathBuf;
use std::sync::mpsc;

use posemark_core::provider::{PoseDetector, PoseModel};

use crate::messages::{WorkerCommand, WorkerResult};

use super::{detect, io};

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    model: PoseModel,
    keypoints_dir: Option<PathBuf>,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("posemark-worker".into())
        .spawn(move || {
            let detector = PoseDetector::sidecar(model, keypoints_dir);
            worker_loop(cmd_rx, result_tx, ctx, detector);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    mut detector: PoseDetector,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                io::handle_load_image(&path, &tx, &ctx);
            }
            WorkerCommand::Detect { ticket, image } => {
                detect::handle_detect(ticket, &image, &mut detector, &tx, &ctx);
            }
            WorkerCommand::SetKeypointsDir { dir } => {
                if let Some(ref dir) = dir {
                    send_log(&tx, &ctx, format!("Reading pose results from {}", dir.display()));
                }
                detector = PoseDetector::sidecar(detector.selected(), dir);
            }
            WorkerCommand::Export {
                request,
                path,
                jpeg_quality,
                font,
            } => {
                io::handle_export(&request, &path, jpeg_quality, font, &tx, &ctx);
            }
        }
    }
}
