//! Result and error types for media-parser.

use thiserror::Error;

/// Result type for media-parser operations
pub type MediaParserResult<T> = Result<T, MediaParserError>;

/// Errors that can occur while probing, rendering or exporting
#[derive(Debug, Error)]
pub enum MediaParserError {
    /// ffprobe could not be started or exited unsuccessfully
    #[error("ffprobe failed: {message}")]
    Ffprobe {
        /// Error message (stderr of the probe when available)
        message: String,
    },

    /// ffprobe did not finish within the configured timeout
    #[error("ffprobe timed out after {secs}s")]
    ProbeTimeout {
        /// Timeout in seconds
        secs: u64,
    },

    /// ffprobe output could not be interpreted
    #[error("Failed to parse ffprobe output: {message}")]
    ProbeParse {
        /// Error message
        message: String,
    },

    /// Export directory or file could not be written
    #[error("Export failed: {message}")]
    Export {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl MediaParserError {
    /// Create an ffprobe error
    #[must_use]
    pub fn ffprobe(message: impl Into<String>) -> Self {
        Self::Ffprobe {
            message: message.into(),
        }
    }

    /// Create a probe parse error
    #[must_use]
    pub fn probe_parse(message: impl Into<String>) -> Self {
        Self::ProbeParse {
            message: message.into(),
        }
    }

    /// Create an export error
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }
}
