use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use posemark_core::io::load_image;
use posemark_core::provider::{sidecar_path, PoseModel};

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Directory holding pose result files (defaults to the image's directory)
    #[arg(long)]
    pub keypoints_dir: Option<PathBuf>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let image = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let file_size = std::fs::metadata(&args.file)?.len();

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", image.width(), image.height());
    println!("File size:   {:.1} KB", file_size as f64 / 1024.0);

    for &model in PoseModel::ALL {
        let path = sidecar_path(&args.file, args.keypoints_dir.as_deref(), model);
        let status = if path.is_file() { "found" } else { "missing" };
        println!(
            "{:<13}{} ({})",
            format!("{model}:"),
            status,
            path.display()
        );
    }

    Ok(())
}
