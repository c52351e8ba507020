use serde_json::{Map, Value};

use crate::error::FormatResult;

/// Pass-through formatting flags for JSON encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOptions {
    pub pretty: bool,
}

/// Encodes a canonical map as JSON.
pub fn to_json(map: &Map<String, Value>, options: JsonOptions) -> FormatResult<String> {
    let text = if options.pretty {
        serde_json::to_string_pretty(map)?
    } else {
        serde_json::to_string(map)?
    };
    Ok(text)
}
