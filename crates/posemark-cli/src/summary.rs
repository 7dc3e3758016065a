use std::path::Path;

use console::Style;
use posemark_core::landmarks::LandmarkSet;
use posemark_core::provider::{PoseModel, RawPose};
use posemark_core::render::export::{ExportBackground, ExportKind};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_detection_summary(file: &Path, model: PoseModel, landmarks: &LandmarkSet, raw: &RawPose) {
    let s = Styles::new();
    print_title(&s, "PoseMark Detection");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(file.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Provider"),
        s.method.apply_to(model)
    );
    let visible = raw.landmarks.iter().filter(|l| l.is_visible()).count();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Keypoints"),
        s.value
            .apply_to(format!("{visible}/{} visible", raw.landmarks.len()))
    );
    println!();

    println!("  {}", s.header.apply_to("Landmarks"));
    for landmark in landmarks {
        println!(
            "    {:<12}{}",
            s.label.apply_to(&landmark.name),
            s.value
                .apply_to(format!("{:>8.1} {:>8.1}", landmark.x, landmark.y))
        );
    }
    println!();
}

pub fn print_export_summary(
    input: &Path,
    output: &Path,
    kind: ExportKind,
    background: ExportBackground,
    model: PoseModel,
    (width, height): (u32, u32),
    landmark_count: usize,
) {
    let s = Styles::new();
    print_title(&s, "PoseMark Export");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Kind"),
        s.method.apply_to(kind)
    );
    if kind == ExportKind::SkeletonOnly {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Background"),
            s.value.apply_to(background)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{width}x{height}"))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Provider"),
        s.method.apply_to(model)
    );
    if landmark_count == 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Landmarks"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Landmarks"),
            s.value.apply_to(landmark_count)
        );
    }
    println!();
}
