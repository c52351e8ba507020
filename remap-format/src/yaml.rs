use serde_json::{Map, Value};

use crate::error::FormatResult;

/// Encodes a canonical map as YAML.
///
/// Requires the `yaml` cargo feature; without it the call fails with a
/// capability-missing error rather than silently degrading.
#[cfg(feature = "yaml")]
pub fn to_yaml(map: &Map<String, Value>) -> FormatResult<String> {
    serde_yaml::to_string(map).map_err(|e| crate::error::FormatError::Yaml(e.to_string()))
}

#[cfg(not(feature = "yaml"))]
pub fn to_yaml(_map: &Map<String, Value>) -> FormatResult<String> {
    Err(crate::error::FormatError::MissingCodec { capability: "yaml" })
}
