mod common;

use std::sync::Arc;

use posemark_core::error::{PoseMarkError, Result};
use posemark_core::geometry::{Point, Size};
use posemark_core::io::{load_image, SourceImage};
use posemark_core::landmarks::BodyPart;
use posemark_core::provider::{
    mediapipe, movenet, normalize, sidecar_path, DetectionOutcome, MediaPipeResults, PoseBackend,
    PoseDetector, PoseModel, ProviderOutput, RawLandmark, RawPose,
};

fn expect_detected(outcome: DetectionOutcome) -> posemark_core::provider::Detection {
    match outcome {
        DetectionOutcome::Detected(d) => d,
        DetectionOutcome::NoPose { reason } => panic!("expected detection, got no pose: {reason}"),
    }
}

fn assert_point_eq(a: Point, b: Point) {
    assert!(
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3,
        "{a:?} != {b:?}"
    );
}

// ---------------------------------------------------------------------------
// PoseModel
// ---------------------------------------------------------------------------

#[test]
fn test_model_display_and_parse() {
    assert_eq!(format!("{}", PoseModel::MediaPipe), "MediaPipe");
    assert_eq!(format!("{}", PoseModel::MoveNet), "MoveNet");
    assert_eq!("movenet".parse::<PoseModel>().unwrap(), PoseModel::MoveNet);
    assert_eq!("MediaPipe".parse::<PoseModel>().unwrap(), PoseModel::MediaPipe);
    assert!("openpose".parse::<PoseModel>().is_err());
}

#[test]
fn test_model_default_is_mediapipe() {
    assert_eq!(PoseModel::default(), PoseModel::MediaPipe);
}

#[test]
fn test_connection_tables() {
    assert_eq!(PoseModel::MediaPipe.connections().len(), 35);
    assert_eq!(PoseModel::MoveNet.connections().len(), 16);
    for &(a, b) in PoseModel::MediaPipe.connections() {
        assert!(a < mediapipe::LANDMARK_COUNT && b < mediapipe::LANDMARK_COUNT);
    }
    for &(a, b) in PoseModel::MoveNet.connections() {
        assert!(a < movenet::KEYPOINT_NAMES.len() && b < movenet::KEYPOINT_NAMES.len());
    }
}

#[test]
fn test_normalized_pose_uses_model_topology() {
    let size = common::image_size();
    let kp = common::sample_keypoints();

    let mp = expect_detected(normalize(
        &ProviderOutput::MediaPipe(common::mediapipe_results(&kp, size, Some(0.9))),
        size,
    ));
    assert_eq!(mp.raw.connections, PoseModel::MediaPipe.connections());

    let mn = expect_detected(normalize(
        &ProviderOutput::MoveNet(common::movenet_poses(&kp, size, Some(0.9))),
        size,
    ));
    assert_eq!(mn.raw.connections, PoseModel::MoveNet.connections());
}

// ---------------------------------------------------------------------------
// MediaPipe
// ---------------------------------------------------------------------------

#[test]
fn test_mediapipe_keypoints_in_pixels() {
    let kp = common::sample_keypoints();
    let output = ProviderOutput::MediaPipe(common::mediapipe_results(
        &kp,
        common::image_size(),
        Some(0.9),
    ));
    let d = expect_detected(normalize(&output, common::image_size()));

    assert_eq!(d.model, PoseModel::MediaPipe);
    assert_eq!(d.raw.landmarks.len(), 33);
    for part in BodyPart::ALL {
        assert_point_eq(d.keypoints.get(part), kp.get(part));
    }
    assert_eq!(d.landmarks().len(), 12);
}

#[test]
fn test_mediapipe_missing_landmarks_is_no_pose() {
    let output = ProviderOutput::MediaPipe(MediaPipeResults::default());
    assert!(matches!(
        normalize(&output, common::image_size()),
        DetectionOutcome::NoPose { .. }
    ));

    let empty = ProviderOutput::MediaPipe(MediaPipeResults {
        pose_landmarks: Some(vec![]),
    });
    assert!(matches!(
        normalize(&empty, common::image_size()),
        DetectionOutcome::NoPose { .. }
    ));
}

#[test]
fn test_mediapipe_truncated_pose_is_no_pose() {
    let mut results =
        common::mediapipe_results(&common::sample_keypoints(), common::image_size(), None);
    if let Some(ref mut l) = results.pose_landmarks {
        l.truncate(20);
    }
    let output = ProviderOutput::MediaPipe(results);
    assert!(matches!(
        normalize(&output, common::image_size()),
        DetectionOutcome::NoPose { .. }
    ));
}

#[test]
fn test_mediapipe_json_parsing() {
    let json = r#"{"poseLandmarks": [{"x": 0.1, "y": 0.2, "z": -0.3, "visibility": 0.7}]}"#;
    let output = ProviderOutput::from_json(PoseModel::MediaPipe, json).unwrap();
    match output {
        ProviderOutput::MediaPipe(r) => {
            let l = r.pose_landmarks.unwrap();
            assert_eq!(l.len(), 1);
            assert!((l[0].x - 0.1).abs() < 1e-6);
            assert_eq!(l[0].visibility, Some(0.7));
        }
        other => panic!("unexpected output {other:?}"),
    }

    let none = ProviderOutput::from_json(PoseModel::MediaPipe, "{}").unwrap();
    assert!(matches!(
        normalize(&none, common::image_size()),
        DetectionOutcome::NoPose { .. }
    ));
}

// ---------------------------------------------------------------------------
// MoveNet
// ---------------------------------------------------------------------------

#[test]
fn test_movenet_normalizes_by_image_size() {
    let kp = common::sample_keypoints();
    let size = common::image_size();
    let output = ProviderOutput::MoveNet(common::movenet_poses(&kp, size, Some(0.6)));
    let d = expect_detected(normalize(&output, size));

    assert_eq!(d.model, PoseModel::MoveNet);
    assert_eq!(d.raw.landmarks.len(), 17);
    // left_shoulder is COCO index 5
    let ls = d.raw.landmarks[5];
    assert!((ls.x - 120.0 / 200.0).abs() < 1e-6);
    assert!((ls.y - 100.0 / 400.0).abs() < 1e-6);
    assert_eq!(ls.visibility, Some(0.6));
    for part in BodyPart::ALL {
        assert_point_eq(d.keypoints.get(part), kp.get(part));
    }
}

#[test]
fn test_movenet_unnamed_keypoints_use_coco_order() {
    let kp = common::sample_keypoints();
    let size = common::image_size();
    let mut poses = common::movenet_poses(&kp, size, Some(0.9));
    for k in &mut poses[0].keypoints {
        k.name = None;
    }
    let d = expect_detected(normalize(&ProviderOutput::MoveNet(poses), size));
    assert_point_eq(d.keypoints.get(BodyPart::RightKnee), kp.get(BodyPart::RightKnee));
}

#[test]
fn test_movenet_no_poses_is_no_pose() {
    let output = ProviderOutput::MoveNet(vec![]);
    assert!(matches!(
        normalize(&output, common::image_size()),
        DetectionOutcome::NoPose { .. }
    ));
}

#[test]
fn test_movenet_missing_required_part_is_no_pose() {
    let size = common::image_size();
    let mut poses = common::movenet_poses(&common::sample_keypoints(), size, Some(0.9));
    poses[0]
        .keypoints
        .retain(|k| k.name.as_deref() != Some("left_knee"));
    match normalize(&ProviderOutput::MoveNet(poses), size) {
        DetectionOutcome::NoPose { reason } => assert!(reason.contains("left_knee")),
        DetectionOutcome::Detected(_) => panic!("expected no pose"),
    }
}

#[test]
fn test_degenerate_image_is_no_pose() {
    let output = ProviderOutput::MoveNet(common::movenet_poses(
        &common::sample_keypoints(),
        common::image_size(),
        None,
    ));
    assert!(matches!(
        normalize(&output, Size::new(0.0, 0.0)),
        DetectionOutcome::NoPose { .. }
    ));
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[test]
fn test_visibility_threshold() {
    let lm = |v| RawLandmark {
        x: 0.0,
        y: 0.0,
        visibility: v,
    };
    assert!(lm(None).is_visible());
    assert!(lm(Some(0.5)).is_visible());
    assert!(lm(Some(0.9)).is_visible());
    assert!(!lm(Some(0.49)).is_visible());
    assert!(!lm(Some(0.0)).is_visible());
}

#[test]
fn test_visible_segments_skip_hidden_endpoints() {
    static CONNECTIONS: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 5)];
    let pose = RawPose {
        landmarks: vec![
            RawLandmark {
                x: 0.0,
                y: 0.0,
                visibility: Some(0.9),
            },
            RawLandmark {
                x: 0.5,
                y: 0.5,
                visibility: None,
            },
            RawLandmark {
                x: 1.0,
                y: 1.0,
                visibility: Some(0.2),
            },
        ],
        connections: &CONNECTIONS,
    };
    let size = Size::new(100.0, 50.0);
    let segments: Vec<_> = pose.visible_segments(size).collect();
    assert_eq!(segments, vec![(Point::new(0.0, 0.0), Point::new(50.0, 25.0))]);
    assert_eq!(pose.visible_points(size).count(), 2);
}

// ---------------------------------------------------------------------------
// Sidecar backend and detector
// ---------------------------------------------------------------------------

#[test]
fn test_sidecar_path_layout() {
    let image = std::path::Path::new("/photos/run/frame_01.png");
    assert_eq!(
        sidecar_path(image, None, PoseModel::MoveNet),
        std::path::PathBuf::from("/photos/run/frame_01.movenet.json")
    );
    assert_eq!(
        sidecar_path(image, Some(std::path::Path::new("/kp")), PoseModel::MediaPipe),
        std::path::PathBuf::from("/kp/frame_01.mediapipe.json")
    );
}

#[test]
fn test_detector_reads_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_png(dir.path(), "pose.png", common::IMAGE_WIDTH, common::IMAGE_HEIGHT);
    let results =
        common::mediapipe_results(&common::sample_keypoints(), common::image_size(), Some(0.8));
    common::write_sidecar(
        &path,
        PoseModel::MediaPipe,
        &serde_json::to_string(&results).unwrap(),
    );

    let image = load_image(&path).unwrap();
    let mut detector = PoseDetector::sidecar(PoseModel::MediaPipe, None);
    let d = expect_detected(detector.detect(&image).unwrap());
    assert_eq!(d.model, PoseModel::MediaPipe);
}

#[test]
fn test_detector_switches_models() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_png(dir.path(), "pose.png", common::IMAGE_WIDTH, common::IMAGE_HEIGHT);
    let poses =
        common::movenet_poses(&common::sample_keypoints(), common::image_size(), Some(0.8));
    common::write_sidecar(&path, PoseModel::MoveNet, &serde_json::to_string(&poses).unwrap());

    let image = load_image(&path).unwrap();
    let mut detector = PoseDetector::sidecar(PoseModel::MediaPipe, None);
    // No MediaPipe sidecar exists.
    assert!(matches!(
        detector.detect(&image),
        Err(PoseMarkError::ProviderOutput { .. })
    ));

    detector.select(PoseModel::MoveNet).unwrap();
    let d = expect_detected(detector.detect(&image).unwrap());
    assert_eq!(d.model, PoseModel::MoveNet);
}

#[test]
fn test_sidecar_missing_dir_fails_init() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let mut detector = PoseDetector::sidecar(PoseModel::MoveNet, Some(missing));
    assert!(matches!(
        detector.select(PoseModel::MoveNet),
        Err(PoseMarkError::ProviderInit { .. })
    ));
    assert_eq!(detector.selected(), PoseModel::MoveNet);
}

#[test]
fn test_in_memory_image_has_no_sidecar() {
    let mut detector = PoseDetector::sidecar(PoseModel::MediaPipe, None);
    let image = common::sample_image();
    assert!(detector.detect(&image).is_err());
}

struct FlakyBackend {
    attempts: Arc<std::sync::atomic::AtomicUsize>,
}

impl PoseBackend for FlakyBackend {
    fn model(&self) -> PoseModel {
        PoseModel::MoveNet
    }

    fn initialize(&mut self) -> Result<()> {
        let n = self
            .attempts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if n == 0 {
            Err(PoseMarkError::ProviderInit {
                model: "MoveNet".into(),
                message: "warming up".into(),
            })
        } else {
            Ok(())
        }
    }

    fn estimate(&mut self, image: &SourceImage) -> Result<ProviderOutput> {
        Ok(ProviderOutput::MoveNet(common::movenet_poses(
            &common::sample_keypoints(),
            image.size(),
            Some(0.9),
        )))
    }
}

#[test]
fn test_failed_init_is_retried() {
    let attempts = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let mut detector = PoseDetector::new(PoseModel::MoveNet).with_backend(Box::new(FlakyBackend {
        attempts: attempts.clone(),
    }));
    let image = common::sample_image();

    assert!(detector.detect(&image).is_err());
    assert!(detector.detect(&image).is_ok());
    // Initialized once successfully; not re-run afterwards.
    assert!(detector.detect(&image).is_ok());
    assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_mismatched_backend_output_is_rejected() {
    struct WrongModel;
    impl PoseBackend for WrongModel {
        fn model(&self) -> PoseModel {
            PoseModel::MediaPipe
        }
        fn estimate(&mut self, _image: &SourceImage) -> Result<ProviderOutput> {
            Ok(ProviderOutput::MoveNet(vec![]))
        }
    }

    let mut detector = PoseDetector::new(PoseModel::MediaPipe).with_backend(Box::new(WrongModel));
    assert!(matches!(
        detector.detect(&common::sample_image()),
        Err(PoseMarkError::ProviderOutput { .. })
    ));
}
