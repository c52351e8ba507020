//! Error types for schema construction.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while building or validating a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field name was declared twice.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A hook references a field that is not part of the schema.
    #[error("unknown field in {hook} declaration: {field}")]
    UnknownField { hook: &'static str, field: String },

    /// A cast descriptor could not be parsed.
    #[error("invalid cast descriptor: {0:?}")]
    InvalidCastDescriptor(String),

    /// A template entry is not wrapped in `{{ }}` delimiters.
    #[error("invalid template descriptor: {0:?}")]
    InvalidTemplate(String),

    /// The schema has no fields.
    #[error("schema {0:?} declares no fields")]
    Empty(String),
}
