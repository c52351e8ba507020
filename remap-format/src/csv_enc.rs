use serde_json::{Map, Value};

use crate::error::{FormatError, FormatResult};

/// Encodes a canonical map as CSV: one header row of field names, one data
/// row of values, in map order.
///
/// Quoting is the writer's RFC 4180 behavior: values containing a comma or
/// quote are wrapped in quotes with internal quotes doubled. Containers
/// render as compact JSON within their cell.
pub fn to_csv(map: &Map<String, Value>) -> FormatResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let headers: Vec<&str> = map.keys().map(String::as_str).collect();
    writer
        .write_record(&headers)
        .map_err(|e| FormatError::Csv(e.to_string()))?;

    let cells: Vec<String> = map.values().map(cell).collect();
    writer
        .write_record(&cells)
        .map_err(|e| FormatError::Csv(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| FormatError::Csv(e.to_string()))
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(_) | Value::Bool(_) => value.to_string(),
        container => serde_json::to_string(container).unwrap_or_default(),
    }
}
