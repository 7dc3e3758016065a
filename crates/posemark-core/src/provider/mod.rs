//! Pose provider adapter.
//!
//! Two interchangeable pose-estimation providers produce results in their own
//! native shapes. This module turns either into one contract: a normalized raw
//! pose (for the full-pose overlay) plus the eight named keypoints the
//! landmark model derives its skeleton from.

mod backend;
mod detector;
pub mod mediapipe;
pub mod movenet;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::VISIBILITY_THRESHOLD;
use crate::error::{PoseMarkError, Result};
use crate::geometry::{Point, Size};
use crate::landmarks::{derive_from_keypoints, Keypoints, LandmarkSet};

pub use backend::{sidecar_path, PoseBackend, SidecarBackend};
pub use detector::PoseDetector;
pub use mediapipe::{MediaPipeLandmark, MediaPipeResults};
pub use movenet::{MoveNetKeypoint, MoveNetPose};

/// Which pose provider produced (or should produce) a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseModel {
    #[default]
    MediaPipe,
    MoveNet,
}

impl PoseModel {
    pub const ALL: &[Self] = &[Self::MediaPipe, Self::MoveNet];

    /// Short lowercase tag, used in sidecar file names and on the CLI.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::MediaPipe => "mediapipe",
            Self::MoveNet => "movenet",
        }
    }

    /// Skeleton topology of the provider's full keypoint set.
    pub fn connections(&self) -> &'static [(usize, usize)] {
        match self {
            Self::MediaPipe => &mediapipe::POSE_CONNECTIONS,
            Self::MoveNet => &movenet::POSE_CONNECTIONS,
        }
    }
}

impl fmt::Display for PoseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MediaPipe => write!(f, "MediaPipe"),
            Self::MoveNet => write!(f, "MoveNet"),
        }
    }
}

impl FromStr for PoseModel {
    type Err = PoseMarkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PoseMarkError::Config(format!("unknown pose model '{s}'")))
    }
}

/// One provider keypoint in image-fraction coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl RawLandmark {
    /// Landmarks without a visibility score count as visible.
    pub fn is_visible(&self) -> bool {
        self.visibility.is_none_or(|v| v >= VISIBILITY_THRESHOLD)
    }

    pub fn to_pixels(&self, image: Size) -> Point {
        Point::new(self.x * image.width, self.y * image.height)
    }
}

/// The complete provider pose: every keypoint plus the provider's topology.
#[derive(Clone, Debug, PartialEq)]
pub struct RawPose {
    pub landmarks: Vec<RawLandmark>,
    pub connections: &'static [(usize, usize)],
}

impl RawPose {
    /// Edges whose endpoints both exist and are visible, in image pixels.
    pub fn visible_segments(&self, image: Size) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.connections.iter().filter_map(move |&(i, j)| {
            let a = self.landmarks.get(i)?;
            let b = self.landmarks.get(j)?;
            (a.is_visible() && b.is_visible()).then(|| (a.to_pixels(image), b.to_pixels(image)))
        })
    }

    /// Visible keypoints, in image pixels.
    pub fn visible_points(&self, image: Size) -> impl Iterator<Item = Point> + '_ {
        self.landmarks
            .iter()
            .filter(|l| l.is_visible())
            .map(move |l| l.to_pixels(image))
    }
}

/// A provider result in the provider's own native shape.
#[derive(Clone, Debug)]
pub enum ProviderOutput {
    MediaPipe(MediaPipeResults),
    MoveNet(Vec<MoveNetPose>),
}

impl ProviderOutput {
    pub fn model(&self) -> PoseModel {
        match self {
            Self::MediaPipe(_) => PoseModel::MediaPipe,
            Self::MoveNet(_) => PoseModel::MoveNet,
        }
    }

    /// Parse the provider's JSON output.
    pub fn from_json(model: PoseModel, json: &str) -> Result<Self> {
        Ok(match model {
            PoseModel::MediaPipe => Self::MediaPipe(serde_json::from_str(json)?),
            PoseModel::MoveNet => Self::MoveNet(serde_json::from_str(json)?),
        })
    }
}

/// A successful detection in the normalized contract.
#[derive(Clone, Debug)]
pub struct Detection {
    pub model: PoseModel,
    pub raw: RawPose,
    /// The eight raw body parts, in image pixels.
    pub keypoints: Keypoints,
}

impl Detection {
    pub fn landmarks(&self) -> LandmarkSet {
        derive_from_keypoints(&self.keypoints)
    }
}

#[derive(Clone, Debug)]
pub enum DetectionOutcome {
    Detected(Detection),
    NoPose { reason: String },
}

impl DetectionOutcome {
    pub(crate) fn no_pose(reason: impl Into<String>) -> Self {
        Self::NoPose {
            reason: reason.into(),
        }
    }
}

/// Normalize a provider result for an image of the given size.
pub fn normalize(output: &ProviderOutput, image: Size) -> DetectionOutcome {
    if image.is_degenerate() {
        return DetectionOutcome::no_pose("image has no area");
    }
    match output {
        ProviderOutput::MediaPipe(results) => mediapipe::normalize(results, image),
        ProviderOutput::MoveNet(poses) => movenet::normalize(poses, image),
    }
}
