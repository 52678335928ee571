use thiserror::Error;

/// Main error type for the subtitle conversion core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// The input could not be parsed as SRT
    #[error("Invalid SRT format: {0}")]
    InvalidFormat(String),

    /// A timestamp failed format or range validation.
    ///
    /// The message already names the stage (parser or generator), so it is
    /// displayed as-is.
    #[error("{0}")]
    InvalidTimestamp(String),

    /// VTT generation was aborted; no partial output is produced
    #[error("VTT generation failed: {0}")]
    Generation(String),

    /// A WebVTT document violated a compliance rule
    #[error("VTT format violation: {0}")]
    Compliance(String),

    /// The caller supplied unusable input (absent content, oversized buffer)
    #[error("Invalid content: {0}")]
    InvalidInput(String),
}

impl SubtitleError {
    /// Whether the error is caused by the caller's input rather than by the converter
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SubtitleError::InvalidFormat(_)
                | SubtitleError::InvalidTimestamp(_)
                | SubtitleError::InvalidInput(_)
        )
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, SubtitleError>;
