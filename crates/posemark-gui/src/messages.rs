use std::path::PathBuf;
use std::sync::Arc;

use ab_glyph::FontArc;
use posemark_core::config::EditorConfig;
use posemark_core::error::Result;
use posemark_core::io::SourceImage;
use posemark_core::provider::DetectionOutcome;
use posemark_core::render::export::{ExportKind, ExportRequest};
use posemark_core::session::DetectionTicket;

/// Commands sent from the UI thread to the worker thread.
pub enum WorkerCommand {
    LoadImage {
        path: PathBuf,
    },
    Detect {
        ticket: DetectionTicket,
        image: Arc<SourceImage>,
    },
    /// Rebuild the providers to read sidecars from another directory.
    SetKeypointsDir {
        dir: Option<PathBuf>,
    },
    Export {
        request: ExportRequest,
        path: PathBuf,
        jpeg_quality: u8,
        font: Option<FontArc>,
    },
}

/// Results sent from the worker thread back to the UI thread.
pub enum WorkerResult {
    /// The worker has started decoding `path`.
    Decoding {
        path: PathBuf,
    },
    ImageFailed {
        message: String,
    },
    ImageLoaded {
        image: Arc<SourceImage>,
    },
    Detection {
        ticket: DetectionTicket,
        result: Result<DetectionOutcome>,
    },
    Exported {
        path: PathBuf,
        kind: ExportKind,
    },
    ConfigImported {
        config: EditorConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
