use common::SerdeFormatError;

/// Errors reported by the bubble detector.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to load detector configuration")]
    Config(#[from] SerdeFormatError),
}

pub type Result<T> = std::result::Result<T, DetectError>;
