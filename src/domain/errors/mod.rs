// Domain errors - one taxonomy for the whole pipeline

use thiserror::Error;

use crate::domain::model::StreamKind;

/// Error type for pipeline operations
#[derive(Error, Debug)]
pub enum DomainError {
    /// Either retrieval failed outright or produced no usable file
    #[error("{stream} download failed for {url}: {reason}")]
    Download {
        stream: StreamKind,
        url: String,
        reason: String,
    },

    /// Multiplexing the video and audio streams failed
    #[error("merge failed: {reason}")]
    Merge { reason: String },

    /// Requested range is empty or negative
    #[error("invalid clip range: start {start}s must be before end {end}s")]
    InvalidRange { start: f64, end: f64 },

    /// Unparseable time argument
    #[error("invalid time \"{input}\": {reason}")]
    InvalidTime { input: String, reason: String },

    /// Extracting the requested range failed
    #[error("trim failed: {reason}")]
    Trim { reason: String },

    /// Workspace directory allocation or removal failure
    #[error("workspace error: {reason}")]
    Workspace { reason: String },

    /// I/O error from intermediate file handling
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DomainError {
    pub(crate) fn bad_time(input: &str, reason: &str) -> Self {
        DomainError::InvalidTime {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for pipeline operations
pub type DomainResult<T> = std::result::Result<T, DomainError>;
