use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{PoseMarkError, Result};
use crate::io::SourceImage;

use super::{normalize, DetectionOutcome, PoseBackend, PoseModel, SidecarBackend};

struct BackendSlot {
    backend: Box<dyn PoseBackend>,
    ready: bool,
}

/// Front door to the pose providers: one backend per model, initialized
/// lazily, with a single selected model at a time.
pub struct PoseDetector {
    selected: PoseModel,
    slots: Vec<BackendSlot>,
}

impl PoseDetector {
    pub fn new(selected: PoseModel) -> Self {
        Self {
            selected,
            slots: Vec::new(),
        }
    }

    /// Detector backed by sidecar files for every model.
    pub fn sidecar(selected: PoseModel, dir: Option<PathBuf>) -> Self {
        PoseModel::ALL.iter().fold(Self::new(selected), |detector, &model| {
            detector.with_backend(Box::new(SidecarBackend::new(model, dir.clone())))
        })
    }

    /// Register a backend, replacing any previous one for the same model.
    pub fn with_backend(mut self, backend: Box<dyn PoseBackend>) -> Self {
        let model = backend.model();
        self.slots.retain(|s| s.backend.model() != model);
        self.slots.push(BackendSlot {
            backend,
            ready: false,
        });
        self
    }

    pub fn selected(&self) -> PoseModel {
        self.selected
    }

    /// Switch providers and make sure the new one is initialized. The
    /// selection sticks even when initialization fails so a later
    /// [`PoseDetector::detect`] can retry.
    pub fn select(&mut self, model: PoseModel) -> Result<()> {
        self.selected = model;
        self.ensure_ready().map(|_| ())
    }

    fn ensure_ready(&mut self) -> Result<&mut BackendSlot> {
        let model = self.selected;
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.backend.model() == model)
            .ok_or_else(|| PoseMarkError::ProviderInit {
                model: model.to_string(),
                message: "no backend registered".into(),
            })?;

        if !slot.ready {
            if let Err(e) = slot.backend.initialize() {
                warn!("{model} initialization failed: {e}");
                return Err(e);
            }
            info!("{model} provider initialized");
            slot.ready = true;
        }
        Ok(slot)
    }

    /// Run the selected provider and normalize its output.
    pub fn detect(&mut self, image: &SourceImage) -> Result<DetectionOutcome> {
        let model = self.selected;
        let slot = self.ensure_ready()?;
        let output = slot.backend.estimate(image)?;

        if output.model() != model {
            return Err(PoseMarkError::ProviderOutput {
                model: model.to_string(),
                message: format!("backend returned {} output", output.model()),
            });
        }

        let outcome = normalize(&output, image.size());
        match outcome {
            DetectionOutcome::Detected(ref d) => {
                info!("{model} detected {} keypoints", d.raw.landmarks.len())
            }
            DetectionOutcome::NoPose { ref reason } => info!("{model}: no pose ({reason})"),
        }
        Ok(outcome)
    }
}
