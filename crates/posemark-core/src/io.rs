use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::debug;

use crate::error::{PoseMarkError, Result};
use crate::geometry::Size;

/// A decoded image together with where it came from.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub path: Option<PathBuf>,
    pub pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage, path: Option<PathBuf>) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(PoseMarkError::InvalidDimensions { width, height });
        }
        Ok(Self { path, pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Size {
        Size::from(self.pixels.dimensions())
    }
}

/// Decode any raster format supported by `image` into RGBA8.
pub fn load_image(path: &Path) -> Result<SourceImage> {
    let img = image::open(path)?;
    let pixels = img.to_rgba8();
    debug!(
        "Decoded {} ({}x{})",
        path.display(),
        pixels.width(),
        pixels.height()
    );
    SourceImage::new(pixels, Some(path.to_path_buf()))
}
