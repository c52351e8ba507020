//! Error types for format encoding.

use thiserror::Error;

/// Result type for encoding operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors that can occur while encoding a canonical map.
#[derive(Debug, Error)]
pub enum FormatError {
    /// JSON encoding error.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error.
    #[error("CSV encode error: {0}")]
    Csv(String),

    /// The requested codec is not compiled in. Distinct from encode errors:
    /// the capability is missing, not the data malformed.
    #[error("codec not available: {capability}")]
    MissingCodec { capability: &'static str },

    /// YAML encoding error.
    #[error("YAML encode error: {0}")]
    Yaml(String),
}
