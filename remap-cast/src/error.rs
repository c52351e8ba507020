//! Error types for cast and filter application.

use serde_json::Value;
use thiserror::Error;

/// Result type for cast operations.
pub type CastResult<T> = Result<T, CastError>;

/// Errors that can occur while applying casts or filters.
#[derive(Debug, Error)]
pub enum CastError {
    /// The raw value cannot be parsed by the cast.
    #[error("cannot cast {raw} as {kind}")]
    Unparsable { kind: String, raw: Value },

    /// The cast kind is not registered.
    #[error("unknown cast kind: {0}")]
    UnknownKind(String),

    /// The `enum:` cast references an unregistered enum type.
    #[error("unknown enum type: {0}")]
    UnknownEnum(String),

    /// A required cast parameter is missing or malformed.
    #[error("invalid parameter for cast {kind}: {reason}")]
    InvalidParam { kind: String, reason: String },

    /// A filter name is not registered.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}
