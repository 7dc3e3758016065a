use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoseMarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("No image loaded")]
    NoImage,

    #[error("Failed to initialize {model} provider: {message}")]
    ProviderInit { model: String, message: String },

    #[error("Malformed {model} output: {message}")]
    ProviderOutput { model: String, message: String },

    #[error("Landmark index {index} out of range (total: {total})")]
    LandmarkIndexOutOfRange { index: usize, total: usize },

    #[error("Font error: {0}")]
    Font(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PoseMarkError>;
