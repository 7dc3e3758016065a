/// Smallest allowed viewport scale.
pub const MIN_SCALE: f32 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f32 = 10.0;

/// Multiplicative zoom change per discrete wheel event (10%).
pub const ZOOM_STEP: f32 = 0.1;

/// Screen-space radius (pixels) within which a pointer grabs a landmark.
pub const HIT_RADIUS: f32 = 25.0;

/// Full-pose points and edges below this visibility are not drawn.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// Line width of the full-pose skeleton, in output pixels.
pub const FULL_POSE_LINE_WIDTH: f32 = 2.0;

/// Joint radius of the full-pose overlay, in output pixels.
pub const FULL_POSE_POINT_RADIUS: f32 = 3.0;

/// Line width of the derived skeleton, in output pixels.
pub const SKELETON_LINE_WIDTH: f32 = 3.0;

/// Radius of a derived landmark marker, in output pixels.
pub const LANDMARK_RADIUS: f32 = 6.0;

/// Label font size, in output pixels.
pub const LABEL_FONT_SIZE: f32 = 16.0;

/// Horizontal gap between a landmark and its label, in output pixels.
pub const LABEL_OFFSET: f32 = 10.0;

/// Width of the dark outline drawn behind label text, in output pixels.
pub const LABEL_OUTLINE_WIDTH: f32 = 2.0;

/// JPEG quality for combined exports.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Default file name of the image + overlay export.
pub const COMBINED_EXPORT_FILENAME: &str = "skeletal-drawing-combined.jpg";

/// Default file name of the overlay-only export.
pub const SKELETON_EXPORT_FILENAME: &str = "skeletal-drawing-skeleton.png";
