//! Dot-notation path resolution against nested maps.
//!
//! A path like `"address.city"` descends one JSON object per segment. A
//! missing segment, or a non-object in the middle of the path, resolves to
//! [`Resolved::Absent`] — a normal value, distinct from a present `null`,
//! which the pipeline maps to field defaults. Resolution is pure and never
//! errors; depth is unbounded.

use serde_json::{Map, Value};

/// Outcome of a path lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The path led to a value (possibly `null`).
    Found(&'a Value),
    /// The path does not exist in the container.
    Absent,
}

impl<'a> Resolved<'a> {
    /// Returns true if the path did not resolve.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    /// Converts to an `Option`, losing the absent/null distinction.
    #[must_use]
    pub fn found(self) -> Option<&'a Value> {
        match self {
            Resolved::Found(v) => Some(v),
            Resolved::Absent => None,
        }
    }
}

/// Resolves a dot-notation path against a nested map.
#[must_use]
pub fn resolve<'a>(root: &'a Map<String, Value>, path: &str) -> Resolved<'a> {
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(s) if !s.is_empty() => s,
        _ => return Resolved::Absent,
    };
    let mut current = match root.get(first) {
        Some(v) => v,
        None => return Resolved::Absent,
    };
    for segment in segments {
        match current {
            Value::Object(map) => match map.get(segment) {
                Some(v) => current = v,
                None => return Resolved::Absent,
            },
            _ => return Resolved::Absent,
        }
    }
    Resolved::Found(current)
}
