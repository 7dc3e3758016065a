pub mod config;
pub mod detect;
pub mod export;
pub mod grade;
pub mod info;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use posemark_core::io::SourceImage;
use posemark_core::provider::{DetectionOutcome, PoseDetector, PoseModel};

#[derive(Clone, Copy, ValueEnum)]
pub enum ModelArg {
    Mediapipe,
    Movenet,
}

impl From<ModelArg> for PoseModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Mediapipe => PoseModel::MediaPipe,
            ModelArg::Movenet => PoseModel::MoveNet,
        }
    }
}

/// Run the selected provider on `image` behind a spinner.
pub fn detect_with_spinner(
    image: &SourceImage,
    model: PoseModel,
    keypoints_dir: Option<&Path>,
) -> Result<DetectionOutcome> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Detecting pose ({model})"));
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut detector = PoseDetector::sidecar(model, keypoints_dir.map(Path::to_path_buf));
    let result = detector
        .select(model)
        .and_then(|_| detector.detect(image))
        .with_context(|| format!("{model} detection failed"));

    pb.finish_and_clear();
    result
}
