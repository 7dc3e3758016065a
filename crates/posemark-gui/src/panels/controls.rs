use posemark_core::provider::PoseModel;
use posemark_core::render::export::{ExportBackground, ExportKind};

use crate::app::PoseMarkApp;

use super::section_header;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut PoseMarkApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                model_section(ui, app);
                ui.separator();
                overlay_section(ui, app);
                ui.separator();
                view_section(ui, app);
                ui.separator();
                export_section(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &mut PoseMarkApp) {
    section_header(ui, "Image", None);
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        super::menu_bar::open_image(app);
    }

    if let Some(ref path) = app.ui_state.file_path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.label(name).on_hover_text(path.display().to_string());
    }
    if let Some(image) = app.session.image() {
        ui.label(format!("{}x{}", image.width(), image.height()));
    }
}

fn model_section(ui: &mut egui::Ui, app: &mut PoseMarkApp) {
    let status = app.session.is_loading().then_some("Detecting...");
    section_header(ui, "Pose Model", status);
    ui.add_space(4.0);

    let mut model = app.session.model();
    egui::ComboBox::from_id_salt("pose_model")
        .selected_text(model.to_string())
        .show_ui(ui, |ui| {
            for &m in PoseModel::ALL {
                ui.selectable_value(&mut model, m, m.to_string());
            }
        });
    if model != app.session.model() {
        app.select_model(model);
    }

    let can_detect = app.session.has_image() && !app.session.is_loading();
    if ui
        .add_enabled(can_detect, egui::Button::new("Detect Again"))
        .clicked()
    {
        app.redetect();
    }
}

fn overlay_section(ui: &mut egui::Ui, app: &mut PoseMarkApp) {
    section_header(ui, "Overlays", None);
    ui.add_space(4.0);

    let mut flags = app.session.flags();
    if ui.checkbox(&mut flags.show_skeleton, "Skeleton").changed() {
        app.session.set_show_skeleton(flags.show_skeleton);
    }
    ui.add_enabled_ui(flags.show_skeleton, |ui| {
        if ui.checkbox(&mut flags.show_labels, "Labels").changed() {
            app.session.set_show_labels(flags.show_labels);
        }
    });
    if ui
        .checkbox(&mut flags.show_full_pose, "Full pose")
        .on_hover_text("Every point the model returned, not just the derived skeleton")
        .changed()
    {
        app.session.set_show_full_pose(flags.show_full_pose);
    }

    ui.add_space(4.0);
    let mut edit_mode = app.session.edit_mode();
    if ui
        .checkbox(&mut edit_mode, "Edit landmarks")
        .on_hover_text("Drag landmarks instead of panning")
        .changed()
    {
        app.session.set_edit_mode(edit_mode);
    }
}

fn view_section(ui: &mut egui::Ui, app: &mut PoseMarkApp) {
    section_header(ui, "View", None);
    ui.add_space(4.0);

    let has_image = app.session.has_image();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_image, egui::Button::new("Reset Landmarks"))
            .clicked()
        {
            app.reset_landmarks();
        }
        if ui
            .add_enabled(has_image, egui::Button::new("Reset View"))
            .clicked()
        {
            app.session.reset_view();
        }
    });
}

fn export_section(ui: &mut egui::Ui, app: &mut PoseMarkApp) {
    section_header(ui, "Export", None);
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.label("Background:");
        egui::ComboBox::from_id_salt("export_background")
            .selected_text(app.config.export.background.to_string())
            .show_ui(ui, |ui| {
                for &bg in ExportBackground::ALL {
                    ui.selectable_value(&mut app.config.export.background, bg, bg.to_string());
                }
            });
    });
    ui.small("Applies to skeleton-only exports.");

    ui.horizontal(|ui| {
        ui.label("JPEG quality:");
        ui.add(egui::Slider::new(&mut app.config.export.jpeg_quality, 1..=100));
    });

    ui.add_space(4.0);
    let has_image = app.session.has_image();
    for &kind in ExportKind::ALL {
        if ui
            .add_enabled(has_image, egui::Button::new(format!("Export {kind}...")))
            .clicked()
        {
            app.export(kind);
        }
    }
}
