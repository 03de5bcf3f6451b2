use thiserror::Error;

#[derive(Debug, Error)]
pub enum StampError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Text measurement failed: {0}")]
    Measure(String),

    #[error("Failed to export stamped image: {0}")]
    Export(String),

    #[error("Surface has no drawable area ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Font error: {0}")]
    Font(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
