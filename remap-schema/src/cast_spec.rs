use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, SchemaResult};

/// A parsed cast descriptor.
///
/// Descriptors are colon-delimited: `"decimal:2"` parses to kind `decimal`
/// with params `["2"]`, `"datetime:%Y-%m-%d"` to kind `datetime` with params
/// `["%Y-%m-%d"]`. A bare `"boolean"` has no params.
///
/// Splitting is on every colon. Casts whose single parameter may legally
/// contain colons (strftime time formats) re-join the params with `:` on use,
/// so `"datetime:%H:%M:%S"` round-trips through `params_joined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastSpec {
    pub kind: String,
    pub params: Vec<String>,
}

impl CastSpec {
    /// Parses a descriptor string. Fails on an empty kind.
    pub fn parse(descriptor: &str) -> SchemaResult<Self> {
        let mut parts = descriptor.split(':');
        let kind = parts.next().unwrap_or_default().trim();
        if kind.is_empty() {
            return Err(SchemaError::InvalidCastDescriptor(descriptor.into()));
        }
        Ok(Self {
            kind: kind.to_string(),
            params: parts.map(str::to_string).collect(),
        })
    }

    /// The params re-joined with `:`, for casts whose one parameter is
    /// allowed to contain colons.
    #[must_use]
    pub fn params_joined(&self) -> String {
        self.params.join(":")
    }

    /// First param, if any.
    #[must_use]
    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}
