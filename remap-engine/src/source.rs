//! Source normalization.
//!
//! Every construction and diff call starts by normalizing its input into one
//! canonical nested map. Accepted sources: a JSON object value, JSON text,
//! XML text, another [`Instance`] (via its canonical map), or a foreign
//! object implementing [`Canonicalize`].
//!
//! XML values are untyped: element text becomes strings, so a numeric field
//! sourced from XML compares as `"30"`, not `30`. Attributes are ignored;
//! repeated sibling elements collapse to a list.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::instance::Instance;

/// An explicit adapter from a foreign type to the canonical map form.
///
/// Comparison and construction sources that are neither maps nor text
/// implement this per type; the engine never inspects foreign objects
/// structurally.
pub trait Canonicalize {
    /// Produces the canonical map representation of this object.
    fn to_canonical_map(&self) -> Result<Map<String, Value>, String>;
}

/// A normalizable input source.
pub enum Source<'a> {
    /// An in-memory JSON value; must be an object at the top level.
    Value(Value),
    /// JSON text; must parse to an object.
    Json(&'a str),
    /// XML text; the root element's children become the map.
    Xml(&'a str),
    /// Another instance, taken through its canonical map.
    Instance(&'a Instance),
    /// A foreign object with an explicit adapter.
    Foreign(&'a dyn Canonicalize),
}

impl Source<'_> {
    /// Wraps an already-canonical map.
    #[must_use]
    pub fn map(map: Map<String, Value>) -> Source<'static> {
        Source::Value(Value::Object(map))
    }
}

impl From<Value> for Source<'static> {
    fn from(value: Value) -> Self {
        Source::Value(value)
    }
}

impl<'a> From<&'a Instance> for Source<'a> {
    fn from(instance: &'a Instance) -> Self {
        Source::Instance(instance)
    }
}

/// Normalizes the non-instance source variants.
///
/// `Source::Instance` needs the engine's cast registry for outbound casting
/// and is handled by [`Engine::normalize`](crate::Engine::normalize).
pub(crate) fn normalize_value(value: Value) -> Result<Map<String, Value>, SourceError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SourceError::NotAMap(other.to_string())),
    }
}

pub(crate) fn normalize_json(text: &str) -> Result<Map<String, Value>, SourceError> {
    let value: Value = serde_json::from_str(text)?;
    normalize_value(value)
}

pub(crate) fn normalize_xml(text: &str) -> Result<Map<String, Value>, SourceError> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text_start = true;
    config.trim_text_end = true;

    // Stack of open elements: (name, child map, accumulated text).
    let mut stack: Vec<(String, Map<String, Value>, String)> =
        vec![(String::new(), Map::new(), String::new())];

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push((name, Map::new(), String::new()));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if let Some((_, children, _)) = stack.last_mut() {
                    insert_child(children, name, Value::String(String::new()));
                }
            }
            Ok(Event::Text(t)) => {
                let text = t
                    .unescape()
                    .map_err(|e| SourceError::Xml(e.to_string()))?;
                if let Some((_, _, acc)) = stack.last_mut() {
                    acc.push_str(&text);
                }
            }
            Ok(Event::CData(t)) => {
                if let Some((_, _, acc)) = stack.last_mut() {
                    acc.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::End(_)) => {
                let (name, children, text) = stack.pop().unwrap_or_default();
                let value = if children.is_empty() {
                    Value::String(text)
                } else {
                    Value::Object(children)
                };
                if let Some((_, parent, _)) = stack.last_mut() {
                    insert_child(parent, name, value);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(SourceError::Xml(e.to_string())),
        }
    }

    if stack.len() != 1 {
        return Err(SourceError::Xml("unclosed element".into()));
    }

    // Unwrap the single root element; its children are the canonical map.
    let (_, mut roots, _) = stack.pop().unwrap_or_default();
    if roots.len() != 1 {
        return Err(SourceError::Xml("expected a single root element".into()));
    }
    let root_value = roots
        .iter_mut()
        .next()
        .map(|(_, v)| v.take())
        .unwrap_or(Value::Null);
    match root_value {
        Value::Object(map) => Ok(map),
        other => Err(SourceError::NotAMap(other.to_string())),
    }
}

/// Inserts a child value; repeated names under one parent collapse to a list.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}
