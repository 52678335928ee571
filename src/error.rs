use subvtt_lib::SubtitleError;
use thiserror::Error;

/// Main error type for the conversion server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Subtitle(#[from] SubtitleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Payload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ServerError>;
