use std::sync::{mpsc, Arc};

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use posemark_core::config::EditorConfig;
use posemark_core::geometry::Size;
use posemark_core::io::SourceImage;
use posemark_core::provider::PoseModel;
use posemark_core::render::export::ExportKind;
use posemark_core::render::{font_from_bytes, load_font};
use posemark_core::session::{ApplyOutcome, DetectionTicket, NoticeLevel, Session};
use tracing::{debug, warn};

use crate::convert::rgba_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::workers;

pub struct PoseMarkApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: Session,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub config: EditorConfig,
    pub label_font: Option<FontArc>,
    /// Error shown in a dialog until dismissed.
    pub error_notice: Option<String>,
    pub show_about: bool,
}

impl PoseMarkApp {
    pub fn new(ctx: &egui::Context) -> Self {
        let config = EditorConfig::default();
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(
            result_tx.clone(),
            ctx.clone(),
            config.default_model,
            config.keypoints_dir.clone(),
        );

        let label_font = bundled_label_font()
            .map_err(|e| warn!("Labels will be skipped in exports: {e:#}"))
            .ok();

        Self {
            cmd_tx,
            result_tx,
            result_rx,
            session: Session::new(Size::default(), config.default_model, config.overlay),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            config,
            label_font,
            error_notice: None,
            show_about: false,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Decoding { path } => {
                    debug!("Decoding {}", path.display());
                    self.session.set_loading(true);
                }
                WorkerResult::ImageFailed { message } => {
                    self.session.set_loading(false);
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::ImageLoaded { image } => {
                    self.on_image_loaded(ctx, image);
                }
                WorkerResult::Detection { ticket, result } => {
                    match self.session.apply_detection(ticket, result) {
                        ApplyOutcome::Applied => self.ui_state.add_log(format!(
                            "{} landmarks detected with {}",
                            self.session.landmarks().len(),
                            ticket.model
                        )),
                        ApplyOutcome::Stale => debug!("Ignored stale {} result", ticket.model),
                        ApplyOutcome::NoPose | ApplyOutcome::Failed => {}
                    }
                    self.drain_notices();
                }
                WorkerResult::Exported { path, kind } => {
                    self.ui_state
                        .add_log(format!("Saved {kind}: {}", path.display()));
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn on_image_loaded(&mut self, ctx: &egui::Context, image: Arc<SourceImage>) {
        let texture = ctx.load_texture(
            "source-image",
            rgba_to_color_image(&image.pixels),
            egui::TextureOptions::LINEAR,
        );
        self.viewport.texture = Some(texture);

        match image.path {
            Some(ref path) => self.ui_state.add_log(format!(
                "Opened: {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            )),
            None => self
                .ui_state
                .add_log(format!("Opened {}x{} image", image.width(), image.height())),
        }
        self.ui_state.file_path = image.path.clone();

        let ticket = self.session.load_image(Arc::clone(&image));
        self.send_command(WorkerCommand::Detect { ticket, image });
    }

    /// Move session notices into the log. Errors also open the error dialog.
    pub fn drain_notices(&mut self) {
        for notice in self.session.drain_notices() {
            let line = match notice.level {
                NoticeLevel::Info => notice.message,
                NoticeLevel::Warning => format!("WARNING: {}", notice.message),
                NoticeLevel::Error => {
                    let line = format!("ERROR: {}", notice.message);
                    self.error_notice = Some(notice.message);
                    line
                }
            };
            self.ui_state.add_log(line);
        }
    }

    fn request_detection(&self, ticket: Option<DetectionTicket>) {
        if let (Some(ticket), Some(image)) = (ticket, self.session.image()) {
            self.send_command(WorkerCommand::Detect {
                ticket,
                image: Arc::clone(image),
            });
        }
    }

    pub fn select_model(&mut self, model: PoseModel) {
        if model == self.session.model() {
            return;
        }
        let ticket = self.session.select_model(model);
        self.ui_state.add_log(format!("Pose model: {model}"));
        self.request_detection(ticket);
    }

    pub fn redetect(&mut self) {
        let ticket = self.session.redetect();
        self.request_detection(ticket);
    }

    pub fn reset_landmarks(&mut self) {
        if self.session.reset_landmarks() {
            self.ui_state.add_log("Landmarks reset".into());
        }
    }

    /// Ask for a destination and hand an export snapshot to the worker.
    pub fn export(&mut self, kind: ExportKind) {
        let request = match self
            .session
            .export_request(kind, self.config.export.background)
        {
            Ok(request) => request,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };

        let file_name = self.config.export.filename(kind).to_string();
        let jpeg_quality = self.config.export.jpeg_quality;
        let font = self.label_font.clone();
        let cmd_tx = self.cmd_tx.clone();
        std::thread::spawn(move || {
            let filter: (&str, &[&str]) = match kind {
                ExportKind::Combined => ("JPEG", &["jpg", "jpeg"]),
                ExportKind::SkeletonOnly => ("PNG", &["png"]),
            };
            if let Some(path) = rfd::FileDialog::new()
                .add_filter(filter.0, filter.1)
                .set_file_name(file_name)
                .save_file()
            {
                let _ = cmd_tx.send(WorkerCommand::Export {
                    request,
                    path,
                    jpeg_quality,
                    font,
                });
            }
        });
    }

    /// Snapshot of the current preferences, for saving.
    pub fn current_config(&self) -> EditorConfig {
        EditorConfig {
            default_model: self.session.model(),
            overlay: self.session.flags(),
            ..self.config.clone()
        }
    }

    /// Adopt imported or reset preferences.
    pub fn apply_config(&mut self, config: EditorConfig) {
        let flags = config.overlay;
        self.session.set_show_skeleton(flags.show_skeleton);
        self.session.set_show_labels(flags.show_labels);
        self.session.set_show_full_pose(flags.show_full_pose);

        let dir_changed = config.keypoints_dir != self.config.keypoints_dir;
        if dir_changed {
            self.send_command(WorkerCommand::SetKeypointsDir {
                dir: config.keypoints_dir.clone(),
            });
        }

        if let Some(ref path) = config.font {
            match load_font(path) {
                Ok(font) => self.label_font = Some(font),
                Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
            }
        }

        let model = config.default_model;
        self.config = config;
        if model != self.session.model() {
            self.select_model(model);
        } else if dir_changed {
            // Same provider, new sidecar files.
            self.redetect();
        }
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for PoseMarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if let Some(message) = self.error_notice.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(message);
                        ui.add_space(8.0);
                        if ui.button("Dismiss").clicked() {
                            self.error_notice = None;
                        }
                    });
                });
        }

        if self.show_about {
            egui::Window::new("About PoseMark")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("PoseMark");
                        ui.label("Pose Landmark Annotation");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

/// The proportional font egui ships with, reused for export labels so they
/// match the canvas.
fn bundled_label_font() -> Result<FontArc> {
    let fonts = egui::FontDefinitions::default();
    let name = fonts
        .families
        .get(&egui::FontFamily::Proportional)
        .and_then(|names| names.first())
        .context("no proportional font bundled")?;
    let data = fonts
        .font_data
        .get(name)
        .with_context(|| format!("font data for {name} missing"))?;
    font_from_bytes(data.font.to_vec()).with_context(|| format!("failed to parse {name}"))
}
