use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use posemark_core::config::EditorConfig;
use posemark_core::io::load_image;
use posemark_core::provider::PoseModel;
use posemark_core::render::export::{render_export, save_export, ExportBackground, ExportKind};
use posemark_core::render::load_font;
use posemark_core::session::{ApplyOutcome, NoticeLevel, Session};
use tracing::warn;

use super::{detect_with_spinner, ModelArg};
use crate::summary::print_export_summary;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Image with overlay, JPEG
    Combined,
    /// Overlay only, PNG
    Skeleton,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BackgroundArg {
    Transparent,
    White,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Input image file
    pub file: PathBuf,

    /// What to export
    #[arg(long, value_enum, default_value = "combined")]
    pub kind: KindArg,

    /// Background for skeleton-only exports (overrides config)
    #[arg(long, value_enum)]
    pub background: Option<BackgroundArg>,

    /// Pose provider whose results to use (overrides config)
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,

    /// Directory holding pose result files (overrides config)
    #[arg(long)]
    pub keypoints_dir: Option<PathBuf>,

    /// Draw the provider's full pose under the skeleton
    #[arg(long)]
    pub full_pose: bool,

    /// Omit landmark labels
    #[arg(long)]
    pub no_labels: bool,

    /// Omit the derived skeleton and its points
    #[arg(long)]
    pub no_skeleton: bool,

    /// TrueType/OpenType font for labels (overrides config)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// JPEG quality for combined exports (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Load editor settings from a TOML file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file path (defaults to the configured export file name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let kind = match args.kind {
        KindArg::Combined => ExportKind::Combined,
        KindArg::Skeleton => ExportKind::SkeletonOnly,
    };
    let background = match args.background {
        Some(BackgroundArg::Transparent) => ExportBackground::Transparent,
        Some(BackgroundArg::White) => ExportBackground::White,
        None => config.export.background,
    };
    let model = args.model.map(PoseModel::from).unwrap_or(config.default_model);
    let quality = args.quality.unwrap_or(config.export.jpeg_quality);
    let keypoints_dir = args.keypoints_dir.clone().or(config.keypoints_dir.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.export.filename(kind)));

    let mut flags = config.overlay;
    flags.show_full_pose |= args.full_pose;
    flags.show_labels &= !args.no_labels;
    flags.show_skeleton &= !args.no_skeleton;

    let font = match args.font.as_ref().or(config.font.as_ref()) {
        Some(path) => Some(
            load_font(path).with_context(|| format!("Failed to load font {}", path.display()))?,
        ),
        None => None,
    };

    let image = Arc::new(
        load_image(&args.file)
            .with_context(|| format!("Failed to load {}", args.file.display()))?,
    );

    let mut session = Session::new(image.size(), model, flags);
    let ticket = session.load_image(image.clone());
    let detected = detect_with_spinner(&image, model, keypoints_dir.as_deref())?;
    let outcome = session.apply_detection(ticket, Ok(detected));
    for notice in session.drain_notices() {
        if notice.level != NoticeLevel::Info {
            warn!("{}", notice.message);
        }
    }
    if outcome != ApplyOutcome::Applied {
        eprintln!("No landmarks detected; exporting without skeleton overlay");
    }

    let request = session.export_request(kind, background)?;
    let pixels = render_export(&request, font);
    save_export(&pixels, kind, quality, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_export_summary(
        &args.file,
        &output,
        kind,
        background,
        model,
        pixels.dimensions(),
        request.landmarks.len(),
    );
    Ok(())
}
