use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use posemark_core::io::load_image;
use posemark_core::landmarks::LandmarkSet;
use posemark_core::provider::{DetectionOutcome, PoseModel, RawLandmark};
use serde::Serialize;

use super::{detect_with_spinner, ModelArg};
use crate::summary::print_detection_summary;

#[derive(Args)]
pub struct DetectArgs {
    /// Input image file
    pub file: PathBuf,

    /// Pose provider whose results to use
    #[arg(long, value_enum, default_value = "mediapipe")]
    pub model: ModelArg,

    /// Directory holding pose result files (defaults to the image's directory)
    #[arg(long)]
    pub keypoints_dir: Option<PathBuf>,

    /// Print landmarks as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct DetectReport<'a> {
    image: &'a std::path::Path,
    model: PoseModel,
    width: u32,
    height: u32,
    landmarks: &'a LandmarkSet,
    raw_landmarks: &'a [RawLandmark],
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let model = PoseModel::from(args.model);

    let detection = match detect_with_spinner(&image, model, args.keypoints_dir.as_deref())? {
        DetectionOutcome::Detected(d) => d,
        DetectionOutcome::NoPose { reason } => {
            anyhow::bail!("No pose detected in {} ({reason})", args.file.display())
        }
    };
    let landmarks = detection.landmarks();

    if args.json {
        let report = DetectReport {
            image: &args.file,
            model,
            width: image.width(),
            height: image.height(),
            landmarks: &landmarks,
            raw_landmarks: &detection.raw.landmarks,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_detection_summary(&args.file, model, &landmarks, &detection.raw);
    }

    Ok(())
}
