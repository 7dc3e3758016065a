use crate::app::PoseMarkApp;

pub fn show(ctx: &egui::Context, app: &mut PoseMarkApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    // Reserve space for 4 empty lines to prevent layout jump.
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if app.session.is_loading() {
                ui.spinner();
                ui.separator();
            }
            if let Some(image) = app.session.image() {
                ui.label(format!("{}x{}", image.width(), image.height()));
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.session.viewport().scale * 100.0));
            ui.separator();
            ui.label(format!("Model: {}", app.session.model()));
            ui.separator();
            ui.label(if app.session.edit_mode() { "Edit" } else { "Pan" });
            if !app.session.landmarks().is_empty() {
                ui.separator();
                ui.label(format!("{} landmarks", app.session.landmarks().len()));
            }
        });

        ui.add_space(2.0);
    });
}
