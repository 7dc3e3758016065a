use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_JPEG_QUALITY;
use crate::error::{PoseMarkError, Result};
use crate::provider::PoseModel;
use crate::render::export::{ExportBackground, ExportKind};
use crate::render::OverlayFlags;

/// Editor preferences, stored as TOML. Every field has a default so partial
/// files load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub default_model: PoseModel,
    /// Where provider sidecar files live. Defaults to the image's directory.
    pub keypoints_dir: Option<PathBuf>,
    /// Font used for labels in exported images.
    pub font: Option<PathBuf>,
    pub overlay: OverlayFlags,
    pub export: ExportConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub background: ExportBackground,
    /// JPEG quality (1-100) for combined exports.
    pub jpeg_quality: u8,
    pub combined_filename: Option<String>,
    pub skeleton_filename: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            background: ExportBackground::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            combined_filename: None,
            skeleton_filename: None,
        }
    }
}

impl ExportConfig {
    /// File name to suggest for an export of `kind`.
    pub fn filename(&self, kind: ExportKind) -> &str {
        let custom = match kind {
            ExportKind::Combined => self.combined_filename.as_deref(),
            ExportKind::SkeletonOnly => self.skeleton_filename.as_deref(),
        };
        custom.unwrap_or(kind.default_filename())
    }
}

impl EditorConfig {
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| PoseMarkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PoseMarkError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        debug!("Loading config from {}", path.display());
        Self::from_toml(&content)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml()?)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(PoseMarkError::Config(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.export.jpeg_quality
            )));
        }
        Ok(())
    }
}
