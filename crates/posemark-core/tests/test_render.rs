mod common;

use posemark_core::consts::{LANDMARK_RADIUS, SKELETON_LINE_WIDTH};
use posemark_core::geometry::{Point, Size};
use posemark_core::landmarks::LandmarkSet;
use posemark_core::provider::{RawLandmark, RawPose};
use posemark_core::render::{build_overlay, interactive_scene, Color, OverlayFlags, OverlayInput, Shape};
use posemark_core::viewport::Viewport;

fn count(shapes: &[Shape]) -> (usize, usize, usize) {
    shapes.iter().fold((0, 0, 0), |(l, c, t), s| match s {
        Shape::Line { .. } => (l + 1, c, t),
        Shape::Circle { .. } => (l, c + 1, t),
        Shape::Text { .. } => (l, c, t + 1),
    })
}

fn input<'a>(
    landmarks: &'a LandmarkSet,
    raw: Option<&'a RawPose>,
    flags: OverlayFlags,
) -> OverlayInput<'a> {
    OverlayInput {
        landmarks,
        raw_pose: raw,
        image_size: common::image_size(),
        flags,
    }
}

fn all_flags() -> OverlayFlags {
    OverlayFlags {
        show_skeleton: true,
        show_labels: true,
        show_full_pose: true,
    }
}

// ---------------------------------------------------------------------------
// Overlay content
// ---------------------------------------------------------------------------

#[test]
fn test_default_flags() {
    let flags = OverlayFlags::default();
    assert!(flags.show_skeleton);
    assert!(flags.show_labels);
    assert!(!flags.show_full_pose);
}

#[test]
fn test_skeleton_with_labels() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let shapes = build_overlay(
        input(&landmarks, None, OverlayFlags::default()),
        &Viewport::identity(),
    );
    assert_eq!(count(&shapes), (9, 12, 12));
}

#[test]
fn test_labels_toggle() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let flags = OverlayFlags {
        show_labels: false,
        ..OverlayFlags::default()
    };
    let shapes = build_overlay(input(&landmarks, None, flags), &Viewport::identity());
    assert_eq!(count(&shapes), (9, 12, 0));
}

#[test]
fn test_skeleton_hidden_hides_points_and_labels() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let flags = OverlayFlags {
        show_skeleton: false,
        show_labels: true,
        show_full_pose: false,
    };
    let shapes = build_overlay(input(&landmarks, None, flags), &Viewport::identity());
    assert!(shapes.is_empty());
}

#[test]
fn test_full_pose_drawn_under_skeleton() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let shapes = build_overlay(input(&landmarks, Some(&d.raw), all_flags()), &Viewport::identity());

    // 35 connections and 33 points, all visible, then the derived overlay.
    assert_eq!(count(&shapes), (35 + 9, 33 + 12, 12));
    assert!(matches!(shapes[0], Shape::Line { color: Color::GREEN, .. }));
    assert!(matches!(shapes[35], Shape::Circle { color: Color::RED, .. }));
}

#[test]
fn test_full_pose_without_raw_pose_draws_nothing_extra() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let shapes = build_overlay(input(&landmarks, None, all_flags()), &Viewport::identity());
    assert_eq!(count(&shapes), (9, 12, 12));
}

#[test]
fn test_low_visibility_skipped_in_both_paths() {
    static CONNECTIONS: [(usize, usize); 2] = [(0, 1), (1, 2)];
    let raw = RawPose {
        landmarks: vec![
            RawLandmark {
                x: 0.1,
                y: 0.1,
                visibility: Some(0.9),
            },
            RawLandmark {
                x: 0.2,
                y: 0.2,
                visibility: Some(0.8),
            },
            RawLandmark {
                x: 0.3,
                y: 0.3,
                visibility: Some(0.3),
            },
        ],
        connections: &CONNECTIONS,
    };
    let landmarks = LandmarkSet::default();
    let flags = OverlayFlags {
        show_skeleton: false,
        show_labels: false,
        show_full_pose: true,
    };

    let export = build_overlay(input(&landmarks, Some(&raw), flags), &Viewport::identity());
    let live = build_overlay(
        input(&landmarks, Some(&raw), flags),
        &Viewport {
            scale: 3.0,
            translate_x: 12.0,
            translate_y: 7.0,
        },
    );
    assert_eq!(count(&export), (1, 2, 0));
    assert_eq!(count(&live), (1, 2, 0));
}

// ---------------------------------------------------------------------------
// Transform handling
// ---------------------------------------------------------------------------

#[test]
fn test_positions_follow_viewport_and_sizes_do_not() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let vp = Viewport {
        scale: 4.0,
        translate_x: -100.0,
        translate_y: 20.0,
    };
    let flags = OverlayFlags::default();
    let identity = build_overlay(input(&landmarks, None, flags), &Viewport::identity());
    let zoomed = build_overlay(input(&landmarks, None, flags), &vp);
    assert_eq!(identity.len(), zoomed.len());

    for (a, b) in identity.iter().zip(&zoomed) {
        match (a, b) {
            (
                Shape::Line {
                    from: fa, width: wa, ..
                },
                Shape::Line {
                    from: fb, width: wb, ..
                },
            ) => {
                assert_eq!(vp.world_to_screen(*fa), *fb);
                assert_eq!(wa, wb);
                assert!((wa - SKELETON_LINE_WIDTH).abs() < f32::EPSILON);
            }
            (
                Shape::Circle {
                    center: ca,
                    radius: ra,
                    ..
                },
                Shape::Circle {
                    center: cb,
                    radius: rb,
                    ..
                },
            ) => {
                assert_eq!(vp.world_to_screen(*ca), *cb);
                assert_eq!(ra, rb);
                assert!((ra - LANDMARK_RADIUS).abs() < f32::EPSILON);
            }
            (Shape::Text { size: sa, .. }, Shape::Text { size: sb, .. }) => assert_eq!(sa, sb),
            _ => panic!("shape order differs between transforms"),
        }
    }
}

#[test]
fn test_label_sits_right_of_point() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let shapes = build_overlay(
        input(&landmarks, None, OverlayFlags::default()),
        &Viewport::identity(),
    );
    let (center, anchor) = match (&shapes[9], &shapes[10]) {
        (Shape::Circle { center, .. }, Shape::Text { anchor, text, .. }) => {
            assert_eq!(text, "L Shoulder");
            (*center, *anchor)
        }
        other => panic!("unexpected shapes {other:?}"),
    };
    assert_eq!(anchor, Point::new(center.x + 10.0, center.y));
}

// ---------------------------------------------------------------------------
// Interactive scene
// ---------------------------------------------------------------------------

#[test]
fn test_scene_without_image_is_background_only() {
    let scene = interactive_scene(Size::new(800.0, 600.0), &Viewport::identity(), None);
    assert_eq!(scene.background, Color::CANVAS);
    assert!(scene.image_rect.is_none());
    assert!(scene.shapes.is_empty());
}

#[test]
fn test_scene_image_rect_uses_viewport() {
    let d = common::sample_detection();
    let landmarks = d.landmarks();
    let canvas = Size::new(800.0, 600.0);
    let vp = Viewport::fit_to_image(common::image_size(), canvas);
    let scene = interactive_scene(canvas, &vp, Some(input(&landmarks, None, OverlayFlags::default())));

    let (min, max) = scene.image_rect.unwrap();
    assert_eq!(min, Point::new(250.0, 0.0));
    assert_eq!(max, Point::new(550.0, 600.0));
    assert_eq!(scene.shapes.len(), 9 + 12 + 12);
}
