use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PoseMarkError, Result};
use crate::geometry::Point;

/// The raw body parts every pose provider must supply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyPart {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
}

impl BodyPart {
    pub const ALL: [Self; 8] = [
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
    ];

    fn slot(self) -> usize {
        self as usize
    }

    /// Display name used for the landmark derived from this part.
    pub fn landmark_name(self) -> &'static str {
        match self {
            Self::LeftShoulder => "L Shoulder",
            Self::RightShoulder => "R Shoulder",
            Self::LeftElbow => "L Elbow",
            Self::RightElbow => "R Elbow",
            Self::LeftHip => "L Hip",
            Self::RightHip => "R Hip",
            Self::LeftKnee => "L Knee",
            Self::RightKnee => "R Knee",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.landmark_name())
    }
}

/// The eight raw keypoints in image-pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Keypoints {
    points: [Point; 8],
}

impl Keypoints {
    /// Build from a lookup that must answer for every [`BodyPart`].
    pub fn from_fn(mut f: impl FnMut(BodyPart) -> Point) -> Self {
        let mut points = [Point::ZERO; 8];
        for part in BodyPart::ALL {
            points[part.slot()] = f(part);
        }
        Self { points }
    }

    pub fn get(&self, part: BodyPart) -> Point {
        self.points[part.slot()]
    }

    pub fn set(&mut self, part: BodyPart, point: Point) {
        self.points[part.slot()] = point;
    }
}

/// A named point in world (image pixel) space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(name: impl Into<String>, position: Point) -> Self {
        Self {
            name: name.into(),
            x: position.x,
            y: position.y,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub const STERNUM: &str = "Sternum";
pub const RIB_CAGE: &str = "Rib Cage";
pub const LEFT_FEMUR: &str = "L Femur";
pub const RIGHT_FEMUR: &str = "R Femur";

/// Edges of the derived skeleton, by landmark name.
pub const SKELETON_CONNECTIONS: [(&str, &str); 9] = [
    ("L Shoulder", "R Shoulder"),
    ("L Shoulder", "L Elbow"),
    ("R Shoulder", "R Elbow"),
    ("L Shoulder", "L Hip"),
    ("R Shoulder", "R Hip"),
    ("L Hip", "R Hip"),
    ("L Hip", "L Knee"),
    ("R Hip", "R Knee"),
    (STERNUM, RIB_CAGE),
];

/// Ordered landmark set. Order is rendering and hit-test priority order;
/// lookups go by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet(Vec<Landmark>);

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.0.get(index)
    }

    pub fn find(&self, name: &str) -> Option<&Landmark> {
        self.0.iter().find(|l| l.name == name)
    }

    /// Resolve [`SKELETON_CONNECTIONS`] against this set, skipping edges
    /// whose endpoints are missing.
    pub fn skeleton_segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        SKELETON_CONNECTIONS.iter().filter_map(|(a, b)| {
            let a = self.find(a)?;
            let b = self.find(b)?;
            Some((a.position(), b.position()))
        })
    }
}

impl<'a> IntoIterator for &'a LandmarkSet {
    type Item = &'a Landmark;
    type IntoIter = std::slice::Iter<'a, Landmark>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compute the 12-entry landmark set from the 8 raw keypoints.
///
/// Sternum is the shoulder midpoint, rib cage the midpoint of sternum and
/// mid-hip, and each femur the midpoint of its hip and knee. The mid-hip
/// itself is not stored.
pub fn derive_from_keypoints(kp: &Keypoints) -> LandmarkSet {
    use BodyPart::*;

    let sternum = kp.get(LeftShoulder).midpoint(kp.get(RightShoulder));
    let mid_hip = kp.get(LeftHip).midpoint(kp.get(RightHip));
    let rib_cage = sternum.midpoint(mid_hip);
    let left_femur = kp.get(LeftHip).midpoint(kp.get(LeftKnee));
    let right_femur = kp.get(RightHip).midpoint(kp.get(RightKnee));

    let raw = |part: BodyPart| Landmark::new(part.landmark_name(), kp.get(part));

    LandmarkSet(vec![
        raw(LeftShoulder),
        raw(RightShoulder),
        raw(LeftElbow),
        raw(RightElbow),
        Landmark::new(STERNUM, sternum),
        Landmark::new(RIB_CAGE, rib_cage),
        raw(LeftHip),
        raw(RightHip),
        raw(LeftKnee),
        raw(RightKnee),
        Landmark::new(LEFT_FEMUR, left_femur),
        Landmark::new(RIGHT_FEMUR, right_femur),
    ])
}

/// Editable landmarks plus the snapshot taken when they were detected.
#[derive(Clone, Debug, Default)]
pub struct LandmarkStore {
    current: LandmarkSet,
    original: LandmarkSet,
}

impl LandmarkStore {
    pub fn current(&self) -> &LandmarkSet {
        &self.current
    }

    pub fn original(&self) -> &LandmarkSet {
        &self.original
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Replace the current set and snapshot it as the reset target.
    pub fn set_current(&mut self, landmarks: LandmarkSet) {
        self.original = landmarks.clone();
        self.current = landmarks;
    }

    /// Move one landmark. Positions are not bounded to the image.
    pub fn move_landmark(&mut self, index: usize, world: Point) -> Result<()> {
        let total = self.current.len();
        let landmark = self
            .current
            .0
            .get_mut(index)
            .ok_or(PoseMarkError::LandmarkIndexOutOfRange { index, total })?;
        landmark.x = world.x;
        landmark.y = world.y;
        Ok(())
    }

    /// Restore the detection snapshot. Returns `false` when there is nothing
    /// to restore.
    pub fn reset_to_original(&mut self) -> bool {
        if self.original.is_empty() {
            return false;
        }
        self.current = self.original.clone();
        debug!("Landmarks reset to original ({} points)", self.current.len());
        true
    }

    pub fn clear(&mut self) {
        self.current = LandmarkSet::default();
        self.original = LandmarkSet::default();
    }
}
