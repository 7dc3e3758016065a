use posemark_core::config::EditorConfig;
use posemark_core::render::export::ExportKind;

use crate::app::PoseMarkApp;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::workers;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff"];

pub fn show(ctx: &egui::Context, app: &mut PoseMarkApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let export_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let skeleton_shortcut = egui::KeyboardShortcut::new(
        egui::Modifiers::COMMAND | egui::Modifiers::SHIFT,
        egui::Key::S,
    );
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(app);
                }

                ui.separator();

                let has_image = app.session.has_image();
                if ui.add_enabled(has_image, egui::Button::new("Export Combined...").shortcut_text(ctx.format_shortcut(&export_shortcut))).clicked() {
                    ui.close();
                    app.export(ExportKind::Combined);
                }
                if ui.add_enabled(has_image, egui::Button::new("Export Skeleton...").shortcut_text(ctx.format_shortcut(&skeleton_shortcut))).clicked() {
                    ui.close();
                    app.export(ExportKind::SkeletonOnly);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(ctx, app);
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Landmarks").clicked() {
                    ui.close();
                    app.reset_landmarks();
                }
                if ui.button("Reset View").clicked() {
                    ui.close();
                    app.session.reset_view();
                }
                if ui.button("Detect Again").clicked() {
                    ui.close();
                    app.redetect();
                }

                ui.separator();

                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(EditorConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus). Shift+S first so the
        // plain shortcut does not swallow it.
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&skeleton_shortcut)) {
            app.export(ExportKind::SkeletonOnly);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&export_shortcut)) {
            app.export(ExportKind::Combined);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_image(app: &mut PoseMarkApp) {
    let cmd_tx = app.cmd_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::LoadImage { path });
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut PoseMarkApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match EditorConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        workers::send(&result_tx, &ctx, result);
    });
}

fn export_config(ctx: &egui::Context, app: &mut PoseMarkApp) {
    let config = app.current_config();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("posemark.toml")
            .save_file()
        {
            let result = match config.save(&path) {
                Ok(()) => WorkerResult::Log {
                    message: format!("Config saved: {}", path.display()),
                },
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to save config: {e}"),
                },
            };
            workers::send(&result_tx, &ctx, result);
        }
    });
}
