#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use posemark_core::geometry::{Point, Size};
use posemark_core::io::SourceImage;
use posemark_core::landmarks::{BodyPart, Keypoints};
use posemark_core::provider::mediapipe::LANDMARK_COUNT;
use posemark_core::provider::movenet::KEYPOINT_NAMES;
use posemark_core::provider::{
    normalize, sidecar_path, Detection, DetectionOutcome, MediaPipeLandmark, MediaPipeResults,
    MoveNetKeypoint, MoveNetPose, PoseModel, ProviderOutput,
};

pub const IMAGE_WIDTH: u32 = 200;
pub const IMAGE_HEIGHT: u32 = 400;

pub fn image_size() -> Size {
    Size::new(IMAGE_WIDTH as f32, IMAGE_HEIGHT as f32)
}

/// A standing figure inside a 200x400 image.
///
/// Derived points: sternum (100, 100), rib cage (100, 160),
/// L femur (116.5, 260), R femur (83.5, 260).
pub fn sample_keypoints() -> Keypoints {
    Keypoints::from_fn(|part| match part {
        BodyPart::LeftShoulder => Point::new(120.0, 100.0),
        BodyPart::RightShoulder => Point::new(80.0, 100.0),
        BodyPart::LeftElbow => Point::new(140.0, 160.0),
        BodyPart::RightElbow => Point::new(60.0, 160.0),
        BodyPart::LeftHip => Point::new(115.0, 220.0),
        BodyPart::RightHip => Point::new(85.0, 220.0),
        BodyPart::LeftKnee => Point::new(118.0, 300.0),
        BodyPart::RightKnee => Point::new(82.0, 300.0),
    })
}

fn mediapipe_index(part: BodyPart) -> usize {
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

fn coco_name(part: BodyPart) -> &'static str {
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

/// A full 33-landmark MediaPipe result placing the body parts at `kp`. Every
/// landmark gets `visibility`; the rest sit at the image center.
pub fn mediapipe_results(kp: &Keypoints, size: Size, visibility: Option<f32>) -> MediaPipeResults {
    let mut landmarks = vec![
        MediaPipeLandmark {
            x: 0.5,
            y: 0.5,
            visibility,
        };
        LANDMARK_COUNT
    ];
    for part in BodyPart::ALL {
        let p = kp.get(part);
        landmarks[mediapipe_index(part)] = MediaPipeLandmark {
            x: p.x / size.width,
            y: p.y / size.height,
            visibility,
        };
    }
    MediaPipeResults {
        pose_landmarks: Some(landmarks),
    }
}

/// A single 17-keypoint MoveNet pose in pixel coordinates.
pub fn movenet_poses(kp: &Keypoints, size: Size, score: Option<f32>) -> Vec<MoveNetPose> {
    let keypoints = KEYPOINT_NAMES
        .iter()
        .map(|&name| {
            let p = BodyPart::ALL
                .iter()
                .find(|&&part| coco_name(part) == name)
                .map(|&part| kp.get(part))
                .unwrap_or(Point::new(size.width / 2.0, size.height / 2.0));
            MoveNetKeypoint {
                x: p.x,
                y: p.y,
                score,
                name: Some(name.to_string()),
            }
        })
        .collect();
    vec![MoveNetPose {
        keypoints,
        score: Some(0.8),
    }]
}

/// Normalize the sample pose through the MediaPipe adapter.
pub fn sample_detection() -> Detection {
    let output = ProviderOutput::MediaPipe(mediapipe_results(
        &sample_keypoints(),
        image_size(),
        Some(0.9),
    ));
    match normalize(&output, image_size()) {
        DetectionOutcome::Detected(d) => d,
        DetectionOutcome::NoPose { reason } => panic!("sample pose not detected: {reason}"),
    }
}

pub fn solid_pixels(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// An in-memory dark gray image with no source path.
pub fn sample_image() -> Arc<SourceImage> {
    Arc::new(
        SourceImage::new(solid_pixels(IMAGE_WIDTH, IMAGE_HEIGHT, [40, 40, 40, 255]), None)
            .expect("valid image"),
    )
}

/// Write a solid PNG into `dir` and return its path.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    solid_pixels(width, height, [40, 40, 40, 255])
        .save(&path)
        .expect("write png");
    path
}

/// Write a provider sidecar next to `image` and return its path.
pub fn write_sidecar(image: &Path, model: PoseModel, json: &str) -> PathBuf {
    let path = sidecar_path(image, None, model);
    std::fs::write(&path, json).expect("write sidecar");
    path
}
