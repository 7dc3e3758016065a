//! Pointer gesture state machine: pan the view or drag a landmark.

use tracing::debug;

use crate::consts::HIT_RADIUS;
use crate::geometry::Point;
use crate::landmarks::{LandmarkSet, LandmarkStore};
use crate::render::OverlayFlags;
use crate::viewport::Viewport;

/// Pointer input in canvas-local screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave,
}

/// The single active gesture, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging {
        index: usize,
    },
    /// `anchor` is the pointer position minus the translation at pan start.
    Panning {
        anchor: Point,
    },
}

/// Cursor affordance the front end should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    /// Hovering a draggable landmark.
    Pointer,
    /// Pan available.
    Grab,
    /// Pan or drag in progress.
    Grabbing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionResponse {
    /// Landmarks or viewport changed.
    pub redraw: bool,
    pub cursor: CursorHint,
}

/// Index of the first landmark within [`HIT_RADIUS`] screen pixels of
/// `pointer`. Set order decides between overlapping landmarks.
pub fn hit_test(landmarks: &LandmarkSet, viewport: &Viewport, pointer: Point) -> Option<usize> {
    landmarks
        .iter()
        .position(|l| viewport.world_to_screen(l.position()).distance(pointer) < HIT_RADIUS)
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    mode: InteractionMode,
    edit_mode: bool,
}

impl InteractionController {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Toggle edit mode. Turning it on hides the full-pose overlay so the raw
    /// pose does not sit on top of the editable skeleton; turning it off leaves
    /// the overlay hidden. Any gesture in progress ends.
    pub fn set_edit_mode(&mut self, enabled: bool, flags: &mut OverlayFlags) {
        if enabled && flags.show_full_pose {
            flags.show_full_pose = false;
            debug!("Full pose overlay hidden for edit mode");
        }
        self.edit_mode = enabled;
        self.cancel();
    }

    /// Drop any active gesture.
    pub fn cancel(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    fn idle_cursor(&self) -> CursorHint {
        if self.edit_mode {
            CursorHint::Default
        } else {
            CursorHint::Grab
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        landmarks: &mut LandmarkStore,
        viewport: &mut Viewport,
    ) -> InteractionResponse {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos, landmarks.current(), viewport),
            PointerEvent::Move(pos) => self.pointer_move(pos, landmarks, viewport),
            PointerEvent::Up | PointerEvent::Leave => {
                self.mode = InteractionMode::Idle;
                InteractionResponse {
                    redraw: false,
                    cursor: self.idle_cursor(),
                }
            }
        }
    }

    fn pointer_down(
        &mut self,
        pos: Point,
        landmarks: &LandmarkSet,
        viewport: &Viewport,
    ) -> InteractionResponse {
        if self.mode != InteractionMode::Idle {
            return InteractionResponse {
                redraw: false,
                cursor: CursorHint::Grabbing,
            };
        }

        if self.edit_mode {
            // Off-target presses in edit mode are swallowed, never panned.
            return match hit_test(landmarks, viewport, pos) {
                Some(index) => {
                    debug!("Dragging landmark {index}");
                    self.mode = InteractionMode::Dragging { index };
                    InteractionResponse {
                        redraw: false,
                        cursor: CursorHint::Grabbing,
                    }
                }
                None => InteractionResponse::default(),
            };
        }

        self.mode = InteractionMode::Panning {
            anchor: pos - viewport.translation(),
        };
        InteractionResponse {
            redraw: false,
            cursor: CursorHint::Grabbing,
        }
    }

    fn pointer_move(
        &mut self,
        pos: Point,
        landmarks: &mut LandmarkStore,
        viewport: &mut Viewport,
    ) -> InteractionResponse {
        match self.mode {
            InteractionMode::Dragging { index } => {
                let world = viewport.screen_to_world(pos);
                if landmarks.move_landmark(index, world).is_err() {
                    // The set changed under the gesture.
                    self.mode = InteractionMode::Idle;
                    return InteractionResponse {
                        redraw: false,
                        cursor: self.idle_cursor(),
                    };
                }
                InteractionResponse {
                    redraw: true,
                    cursor: CursorHint::Grabbing,
                }
            }
            InteractionMode::Panning { anchor } => {
                *viewport = viewport.pan_to(pos - anchor);
                InteractionResponse {
                    redraw: true,
                    cursor: CursorHint::Grabbing,
                }
            }
            InteractionMode::Idle => {
                let cursor = if !self.edit_mode {
                    CursorHint::Grab
                } else if hit_test(landmarks.current(), viewport, pos).is_some() {
                    CursorHint::Pointer
                } else {
                    CursorHint::Default
                };
                InteractionResponse {
                    redraw: false,
                    cursor,
                }
            }
        }
    }
}
