//! Editor application state.
//!
//! A [`Session`] is the single owner of everything the editor mutates: the
//! loaded image, landmarks, viewport, gesture state, and overlay toggles.
//! Detection runs elsewhere and reports back through [`Session::apply_detection`],
//! which only accepts results for the image and model that are still current.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{PoseMarkError, Result};
use crate::geometry::{Point, Size};
use crate::interaction::{
    CursorHint, InteractionController, InteractionMode, InteractionResponse, PointerEvent,
};
use crate::io::SourceImage;
use crate::landmarks::{LandmarkSet, LandmarkStore};
use crate::provider::{DetectionOutcome, PoseModel, RawPose};
use crate::render::export::{ExportBackground, ExportKind, ExportRequest};
use crate::render::{interactive_scene, OverlayFlags, OverlayInput, Scene};
use crate::viewport::Viewport;

/// Identifies one detection request. Results are applied only while their
/// ticket is still the session's current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionTicket {
    pub generation: u64,
    pub model: PoseModel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing, non-fatal message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// What [`Session::apply_detection`] did with a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Landmarks were replaced.
    Applied,
    /// No pose was found; previous landmarks kept.
    NoPose,
    /// The provider failed; previous landmarks kept.
    Failed,
    /// The result belongs to an older image or model and was dropped.
    Stale,
}

#[derive(Default)]
pub struct Session {
    image: Option<Arc<SourceImage>>,
    landmarks: LandmarkStore,
    raw_pose: Option<RawPose>,
    viewport: Viewport,
    canvas_size: Size,
    controller: InteractionController,
    flags: OverlayFlags,
    model: PoseModel,
    generation: u64,
    loading: bool,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(canvas_size: Size, model: PoseModel, flags: OverlayFlags) -> Self {
        Self {
            canvas_size,
            model,
            flags,
            ..Default::default()
        }
    }

    pub fn image(&self) -> Option<&Arc<SourceImage>> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        self.landmarks.current()
    }

    pub fn original_landmarks(&self) -> &LandmarkSet {
        self.landmarks.original()
    }

    pub fn raw_pose(&self) -> Option<&RawPose> {
        self.raw_pose.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn flags(&self) -> OverlayFlags {
        self.flags
    }

    pub fn model(&self) -> PoseModel {
        self.model
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn edit_mode(&self) -> bool {
        self.controller.edit_mode()
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.controller.mode()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Take all pending notices, leaving none.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NoticeLevel::Info => info!("{message}"),
            NoticeLevel::Warning | NoticeLevel::Error => warn!("{message}"),
        }
        self.notices.push(Notice { level, message });
    }

    /// Mark the session as waiting on an external call (decode, model init).
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn next_ticket(&mut self) -> DetectionTicket {
        self.generation += 1;
        DetectionTicket {
            generation: self.generation,
            model: self.model,
        }
    }

    /// Replace the image. All landmark state from the previous image is
    /// dropped in the same step, the view is fitted, and a detection ticket
    /// for the new image is returned.
    pub fn load_image(&mut self, image: Arc<SourceImage>) -> DetectionTicket {
        self.viewport = Viewport::fit_to_image(image.size(), self.canvas_size);
        self.landmarks.clear();
        self.raw_pose = None;
        self.controller.cancel();
        debug!("Loaded {}x{} image", image.width(), image.height());
        self.image = Some(image);
        self.loading = true;
        self.next_ticket()
    }

    /// Switch pose providers. With an image loaded this returns a ticket for
    /// re-running detection; any in-flight result for the old model becomes
    /// stale.
    pub fn select_model(&mut self, model: PoseModel) -> Option<DetectionTicket> {
        self.model = model;
        if self.image.is_none() {
            self.generation += 1;
            return None;
        }
        self.loading = true;
        Some(self.next_ticket())
    }

    /// Ticket for re-running detection on the current image and model.
    pub fn redetect(&mut self) -> Option<DetectionTicket> {
        self.image.as_ref()?;
        self.loading = true;
        Some(self.next_ticket())
    }

    pub fn is_current(&self, ticket: DetectionTicket) -> bool {
        ticket.generation == self.generation && ticket.model == self.model
    }

    /// Apply a detection result if its ticket is still current.
    pub fn apply_detection(
        &mut self,
        ticket: DetectionTicket,
        result: Result<DetectionOutcome>,
    ) -> ApplyOutcome {
        if !self.is_current(ticket) {
            debug!(
                "Dropping stale detection (generation {} vs {})",
                ticket.generation, self.generation
            );
            return ApplyOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(DetectionOutcome::Detected(detection)) => {
                self.landmarks.set_current(detection.landmarks());
                self.raw_pose = Some(detection.raw);
                // The new set is authoritative; a drag on the old one ends here.
                self.controller.cancel();
                info!("Applied {} detection", detection.model);
                ApplyOutcome::Applied
            }
            Ok(DetectionOutcome::NoPose { reason }) => {
                self.notify(
                    NoticeLevel::Warning,
                    format!("No pose detected with {} ({reason})", ticket.model),
                );
                ApplyOutcome::NoPose
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("{} failed: {e}", ticket.model));
                ApplyOutcome::Failed
            }
        }
    }

    /// Canvas resized. The viewport is kept as is.
    pub fn resize_canvas(&mut self, canvas_size: Size) {
        self.canvas_size = canvas_size;
    }

    /// Route a pointer event to the gesture controller. Without an image
    /// pointer input does nothing.
    pub fn pointer(&mut self, event: PointerEvent) -> InteractionResponse {
        if self.image.is_none() {
            return InteractionResponse {
                redraw: false,
                cursor: CursorHint::Default,
            };
        }
        self.controller
            .handle(event, &mut self.landmarks, &mut self.viewport)
    }

    /// Zoom one step at `pointer` from a wheel delta. Returns whether the view
    /// changed.
    pub fn wheel(&mut self, pointer: Point, delta_y: f32) -> bool {
        if self.image.is_none() {
            return false;
        }
        let next = self.viewport.zoom_from_wheel(pointer, delta_y);
        let changed = next != self.viewport;
        self.viewport = next;
        changed
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.controller.set_edit_mode(enabled, &mut self.flags);
    }

    pub fn set_show_skeleton(&mut self, show: bool) {
        self.flags.show_skeleton = show;
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.flags.show_labels = show;
    }

    pub fn set_show_full_pose(&mut self, show: bool) {
        self.flags.show_full_pose = show;
    }

    /// Undo all landmark edits. Returns `false` if there was nothing to
    /// restore.
    pub fn reset_landmarks(&mut self) -> bool {
        self.controller.cancel();
        self.landmarks.reset_to_original()
    }

    /// Re-fit the image to the canvas.
    pub fn reset_view(&mut self) {
        if let Some(ref image) = self.image {
            self.viewport = Viewport::fit_to_image(image.size(), self.canvas_size);
        }
    }

    /// The live canvas for the current state.
    pub fn scene(&self) -> Scene {
        let overlay = self.image.as_ref().map(|image| OverlayInput {
            landmarks: self.landmarks.current(),
            raw_pose: self.raw_pose.as_ref(),
            image_size: image.size(),
            flags: self.flags,
        });
        interactive_scene(self.canvas_size, &self.viewport, overlay)
    }

    /// Snapshot the state needed to export.
    pub fn export_request(
        &self,
        kind: ExportKind,
        background: ExportBackground,
    ) -> Result<ExportRequest> {
        let image = self.image.clone().ok_or(PoseMarkError::NoImage)?;
        Ok(ExportRequest {
            image,
            landmarks: self.landmarks.current().clone(),
            raw_pose: self.raw_pose.clone(),
            flags: self.flags,
            kind,
            background,
        })
    }
}
