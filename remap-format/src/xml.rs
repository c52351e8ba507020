use quick_xml::escape::partial_escape;
use serde_json::{Map, Value};

use crate::error::FormatResult;

/// XML encoding options.
#[derive(Debug, Clone)]
pub struct XmlOptions {
    /// Root element name; `"root"` unless overridden.
    pub root: String,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root: "root".into(),
        }
    }
}

/// Encodes a canonical map as XML.
///
/// Each field becomes a same-named element; nested maps become nested
/// elements; list items repeat as `<item>` elements. Reserved characters
/// (`& < >`) are entity-escaped; empty strings (and nulls) render as
/// self-closing elements.
pub fn to_xml(map: &Map<String, Value>, options: &XmlOptions) -> FormatResult<String> {
    let mut out = String::new();
    out.push('<');
    out.push_str(&options.root);
    out.push('>');
    write_map(&mut out, map);
    out.push_str("</");
    out.push_str(&options.root);
    out.push('>');
    Ok(out)
}

fn write_map(out: &mut String, map: &Map<String, Value>) {
    for (name, value) in map {
        write_value(out, name, value);
    }
}

fn write_value(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            open(out, name);
            write_map(out, map);
            close(out, name);
        }
        Value::Array(items) => {
            open(out, name);
            for item in items {
                write_value(out, "item", item);
            }
            close(out, name);
        }
        Value::String(s) if s.is_empty() => empty(out, name),
        Value::Null => empty(out, name),
        Value::String(s) => {
            open(out, name);
            out.push_str(&partial_escape(s));
            close(out, name);
        }
        scalar => {
            open(out, name);
            out.push_str(&scalar.to_string());
            close(out, name);
        }
    }
}

fn open(out: &mut String, name: &str) {
    out.push('<');
    out.push_str(name);
    out.push('>');
}

fn close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn empty(out: &mut String, name: &str) {
    out.push('<');
    out.push_str(name);
    out.push_str("/>");
}
