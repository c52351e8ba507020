//! Error types for the construction engine.

use remap_cast::CastError;
use remap_schema::SchemaError;
use thiserror::Error;

use crate::rules::Violation;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while normalizing a source into a canonical map.
#[derive(Debug, Error)]
pub enum SourceError {
    /// JSON text could not be parsed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML text could not be parsed.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// The source parsed but is not a map at the top level.
    #[error("source is not a map: {0}")]
    NotAMap(String),

    /// A foreign adapter failed to canonicalize.
    #[error("foreign source error: {0}")]
    Foreign(String),
}

/// Errors surfaced at the construction call boundary.
///
/// Construction is the unit of atomicity: any of these means no instance was
/// produced. Lower-level failures are never swallowed — cast and source
/// errors carry their origin.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The record type has not been registered.
    #[error("unknown record type: {0}")]
    UnknownType(String),

    /// Schema or template descriptor error.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Cast configuration rejected at registration time.
    #[error("cast configuration error: {0}")]
    CastConfig(#[from] CastError),

    /// No value resolved for a required field and no default exists.
    #[error("required field missing: {field}")]
    RequiredFieldMissing { field: String },

    /// Inbound cast failed for a field.
    #[error("cast failure on field {field}: {source}")]
    CastFailure {
        field: String,
        #[source]
        source: CastError,
    },

    /// One or more validation rules failed. All rules run before this is
    /// reported, so the set is complete.
    #[error("validation failed with {} violation(s)", violations.len())]
    ValidationFailed { violations: Vec<Violation> },

    /// The source could not be normalized.
    #[error(transparent)]
    Source(#[from] SourceError),
}
