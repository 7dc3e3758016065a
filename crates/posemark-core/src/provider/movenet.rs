use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::landmarks::{BodyPart, Keypoints};

use super::{Detection, DetectionOutcome, PoseModel, RawLandmark, RawPose};

/// COCO keypoint names in MoveNet output order.
pub const KEYPOINT_NAMES: [&str; 17] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// COCO keypoint adjacency used by MoveNet.
pub const POSE_CONNECTIONS: [(usize, usize); 16] = [
    (0, 1),
    (0, 2),
    (1, 3),
    (2, 4),
    (5, 6),
    (5, 7),
    (5, 11),
    (6, 8),
    (6, 12),
    (7, 9),
    (8, 10),
    (11, 12),
    (11, 13),
    (12, 14),
    (13, 15),
    (14, 16),
];

fn keypoint_name(part: BodyPart) -> &'static str {
    match part {
        BodyPart::LeftShoulder => "left_shoulder",
        BodyPart::RightShoulder => "right_shoulder",
        BodyPart::LeftElbow => "left_elbow",
        BodyPart::RightElbow => "right_elbow",
        BodyPart::LeftHip => "left_hip",
        BodyPart::RightHip => "right_hip",
        BodyPart::LeftKnee => "left_knee",
        BodyPart::RightKnee => "right_knee",
    }
}

/// A MoveNet keypoint in image pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveNetKeypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MoveNetKeypoint {
    /// Keypoints without an explicit name take the COCO name of their slot.
    fn resolved_name(&self, index: usize) -> Option<&str> {
        self.name
            .as_deref()
            .or_else(|| KEYPOINT_NAMES.get(index).copied())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveNetPose {
    pub keypoints: Vec<MoveNetKeypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl MoveNetPose {
    fn find(&self, name: &str) -> Option<&MoveNetKeypoint> {
        self.keypoints
            .iter()
            .enumerate()
            .find(|(i, kp)| kp.resolved_name(*i) == Some(name))
            .map(|(_, kp)| kp)
    }
}

pub(super) fn normalize(poses: &[MoveNetPose], image: Size) -> DetectionOutcome {
    let Some(pose) = poses.first() else {
        return DetectionOutcome::no_pose("no poses found");
    };

    let mut keypoints = Keypoints::default();
    for part in BodyPart::ALL {
        let name = keypoint_name(part);
        match pose.find(name) {
            Some(kp) => keypoints.set(part, Point::new(kp.x, kp.y)),
            None => return DetectionOutcome::no_pose(format!("keypoint '{name}' missing")),
        }
    }

    let raw = pose
        .keypoints
        .iter()
        .map(|kp| RawLandmark {
            x: kp.x / image.width,
            y: kp.y / image.height,
            visibility: kp.score,
        })
        .collect();

    DetectionOutcome::Detected(Detection {
        model: PoseModel::MoveNet,
        raw: RawPose {
            landmarks: raw,
            connections: PoseModel::MoveNet.connections(),
        },
        keypoints,
    })
}
