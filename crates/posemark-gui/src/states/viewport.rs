use posemark_core::interaction::CursorHint;

/// Canvas state that lives outside the session: the uploaded texture and
/// pointer tracking between frames.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub last_pointer: Option<egui::Pos2>,
    pub pointer_inside: bool,
    pub cursor: CursorHint,
}
