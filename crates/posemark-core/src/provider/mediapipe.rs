use serde::{Deserialize, Serialize};

use crate::geometry::Size;
use crate::landmarks::{BodyPart, Keypoints};

use super::{Detection, DetectionOutcome, PoseModel, RawLandmark, RawPose};

/// Number of landmarks in a MediaPipe pose.
pub const LANDMARK_COUNT: usize = 33;

/// MediaPipe `POSE_CONNECTIONS`.
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 7),
    (0, 4),
    (4, 5),
    (5, 6),
    (6, 8),
    (9, 10),
    (11, 12),
    (11, 13),
    (13, 15),
    (15, 17),
    (15, 19),
    (15, 21),
    (17, 19),
    (12, 14),
    (14, 16),
    (16, 18),
    (16, 20),
    (16, 22),
    (18, 20),
    (11, 23),
    (12, 24),
    (23, 24),
    (23, 25),
    (24, 26),
    (25, 27),
    (26, 28),
    (27, 29),
    (28, 30),
    (29, 31),
    (30, 32),
    (27, 31),
    (28, 32),
];

fn landmark_index(part: BodyPart) -> usize {
    match part {
        BodyPart::LeftShoulder => 11,
        BodyPart::RightShoulder => 12,
        BodyPart::LeftElbow => 13,
        BodyPart::RightElbow => 14,
        BodyPart::LeftHip => 23,
        BodyPart::RightHip => 24,
        BodyPart::LeftKnee => 25,
        BodyPart::RightKnee => 26,
    }
}

/// One entry of `poseLandmarks`. Depth (`z`) is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MediaPipeLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

/// The `onResults` payload: landmarks are absent when no pose was found.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MediaPipeResults {
    #[serde(rename = "poseLandmarks", default)]
    pub pose_landmarks: Option<Vec<MediaPipeLandmark>>,
}

pub(super) fn normalize(results: &MediaPipeResults, image: Size) -> DetectionOutcome {
    let landmarks = match results.pose_landmarks.as_deref() {
        Some(l) if !l.is_empty() => l,
        _ => return DetectionOutcome::no_pose("no landmarks found"),
    };

    let required = BodyPart::ALL
        .iter()
        .map(|&p| landmark_index(p))
        .max()
        .unwrap_or(0);
    if landmarks.len() <= required {
        return DetectionOutcome::no_pose(format!(
            "pose has {} landmarks, expected {LANDMARK_COUNT}",
            landmarks.len()
        ));
    }

    let raw: Vec<RawLandmark> = landmarks
        .iter()
        .map(|l| RawLandmark {
            x: l.x,
            y: l.y,
            visibility: l.visibility,
        })
        .collect();

    let keypoints = Keypoints::from_fn(|part| raw[landmark_index(part)].to_pixels(image));

    DetectionOutcome::Detected(Detection {
        model: PoseModel::MediaPipe,
        raw: RawPose {
            landmarks: raw,
            connections: PoseModel::MediaPipe.connections(),
        },
        keypoints,
    })
}
