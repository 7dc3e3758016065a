use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{PoseMarkError, Result};
use crate::io::SourceImage;

use super::{PoseModel, ProviderOutput};

/// Something that runs a pose model on an image and returns its native
/// output. Model execution itself lives outside PoseMark.
pub trait PoseBackend: Send {
    fn model(&self) -> PoseModel;

    /// Prepare the backend. Called once before the first estimate, and again
    /// after a failed attempt.
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn estimate(&mut self, image: &SourceImage) -> Result<ProviderOutput>;
}

/// Location of the sidecar JSON holding `model`'s output for `image`:
/// `<dir>/<stem>.<model>.json`, where `dir` defaults to the image's folder.
pub fn sidecar_path(image: &Path, dir: Option<&Path>, model: PoseModel) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| image.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{stem}.{}.json", model.tag()))
}

/// Reads results an external model run wrote next to the image.
pub struct SidecarBackend {
    model: PoseModel,
    dir: Option<PathBuf>,
}

impl SidecarBackend {
    pub fn new(model: PoseModel, dir: Option<PathBuf>) -> Self {
        Self { model, dir }
    }
}

impl PoseBackend for SidecarBackend {
    fn model(&self) -> PoseModel {
        self.model
    }

    fn initialize(&mut self) -> Result<()> {
        match self.dir {
            Some(ref dir) if !dir.is_dir() => Err(PoseMarkError::ProviderInit {
                model: self.model.to_string(),
                message: format!("keypoint directory {} does not exist", dir.display()),
            }),
            _ => Ok(()),
        }
    }

    fn estimate(&mut self, image: &SourceImage) -> Result<ProviderOutput> {
        let source = image.path.as_deref().ok_or_else(|| PoseMarkError::ProviderOutput {
            model: self.model.to_string(),
            message: "image has no source path to locate results".into(),
        })?;
        let path = sidecar_path(source, self.dir.as_deref(), self.model);
        debug!("Reading {} output from {}", self.model, path.display());

        let json = std::fs::read_to_string(&path).map_err(|e| PoseMarkError::ProviderOutput {
            model: self.model.to_string(),
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        ProviderOutput::from_json(self.model, &json)
    }
}
