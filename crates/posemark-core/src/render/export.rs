use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ab_glyph::FontArc;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::consts::{COMBINED_EXPORT_FILENAME, SKELETON_EXPORT_FILENAME};
use crate::error::Result;
use crate::io::SourceImage;
use crate::landmarks::LandmarkSet;
use crate::provider::RawPose;
use crate::viewport::Viewport;

use super::{build_overlay, Color, OverlayFlags, OverlayInput, RasterCanvas};

/// What the exported raster contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportKind {
    /// Source image with overlays on top, JPEG.
    #[default]
    Combined,
    /// Overlays alone, PNG.
    SkeletonOnly,
}

impl ExportKind {
    pub const ALL: &[Self] = &[Self::Combined, Self::SkeletonOnly];

    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::Combined => COMBINED_EXPORT_FILENAME,
            Self::SkeletonOnly => SKELETON_EXPORT_FILENAME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Combined => "jpg",
            Self::SkeletonOnly => "png",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => write!(f, "Combined"),
            Self::SkeletonOnly => write!(f, "Skeleton Only"),
        }
    }
}

/// Background of a skeleton-only export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportBackground {
    #[default]
    Transparent,
    White,
}

impl ExportBackground {
    pub const ALL: &[Self] = &[Self::Transparent, Self::White];
}

impl fmt::Display for ExportBackground {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => write!(f, "Transparent"),
            Self::White => write!(f, "White"),
        }
    }
}

/// A self-contained snapshot of what to export, safe to hand to another
/// thread while editing continues.
#[derive(Clone, Debug)]
pub struct ExportRequest {
    pub image: Arc<SourceImage>,
    pub landmarks: LandmarkSet,
    pub raw_pose: Option<RawPose>,
    pub flags: OverlayFlags,
    pub kind: ExportKind,
    pub background: ExportBackground,
}

/// Rasterize the export at the image's native resolution, independent of the
/// current zoom and pan.
pub fn render_export(request: &ExportRequest, font: Option<FontArc>) -> RgbaImage {
    let image = &request.image;
    let mut canvas = match request.kind {
        ExportKind::Combined => RasterCanvas::new(image.pixels.clone()),
        ExportKind::SkeletonOnly => {
            let mut c = RasterCanvas::new(RgbaImage::new(image.width(), image.height()));
            if request.background == ExportBackground::White {
                c.fill(Color::WHITE);
            }
            c
        }
    }
    .with_font(font);

    let shapes = build_overlay(
        OverlayInput {
            landmarks: &request.landmarks,
            raw_pose: request.raw_pose.as_ref(),
            image_size: image.size(),
            flags: request.flags,
        },
        &Viewport::identity(),
    );
    canvas.draw(&shapes);
    canvas.into_image()
}

/// Encode an export in its kind's format: JPEG for combined, PNG for
/// skeleton-only.
pub fn encode_export(pixels: &RgbaImage, kind: ExportKind, jpeg_quality: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match kind {
        ExportKind::Combined => {
            let rgb = DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
            rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, jpeg_quality))?;
        }
        ExportKind::SkeletonOnly => {
            pixels.write_with_encoder(PngEncoder::new(&mut buf))?;
        }
    }
    Ok(buf)
}

/// Encode and write an export to `path`.
pub fn save_export(pixels: &RgbaImage, kind: ExportKind, jpeg_quality: u8, path: &Path) -> Result<()> {
    let bytes = encode_export(pixels, kind, jpeg_quality)?;
    std::fs::write(path, &bytes)?;
    info!(
        "Exported {} ({}x{}, {} bytes) to {}",
        kind,
        pixels.width(),
        pixels.height(),
        bytes.len(),
        path.display()
    );
    Ok(())
}
