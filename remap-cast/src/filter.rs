//! Pre-cast value filters.
//!
//! Filters run on the raw extracted value before casting, in declaration
//! order, each filter's output feeding the next. A filter is a pure
//! `Value -> Value` transform and never fails for well-typed input; the
//! string built-ins pass non-string values through unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use remap_schema::FilterSpec;
use serde_json::Value;

use crate::error::{CastError, CastResult};

/// A filter function.
pub type FilterFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Registry of named filters.
pub struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Creates a registry with the built-in filters installed.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            filters: HashMap::new(),
        };
        registry.register_fn("trim", |v| map_str(v, |s| s.trim().to_string()));
        registry.register_fn("lowercase", |v| map_str(v, str::to_lowercase));
        registry.register_fn("uppercase", |v| map_str(v, str::to_uppercase));
        registry.register_fn("squish", |v| {
            map_str(v, |s| s.split_whitespace().collect::<Vec<_>>().join(" "))
        });
        registry
    }

    /// Registers (or replaces) a filter under a name.
    pub fn register_fn<F>(&mut self, name: &str, func: F)
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(func));
    }

    /// Returns true if a filter is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// Applies one filter by name.
    pub fn apply(&self, value: &Value, name: &str) -> CastResult<Value> {
        let f = self
            .filters
            .get(name)
            .ok_or_else(|| CastError::UnknownFilter(name.into()))?;
        Ok(f(value))
    }

    /// Applies a chain of filters in order.
    pub fn apply_chain(&self, value: &Value, chain: &[FilterSpec]) -> CastResult<Value> {
        let mut current = value.clone();
        for spec in chain {
            current = self.apply(&current, &spec.name)?;
        }
        Ok(current)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

fn map_str<F: Fn(&str) -> String>(value: &Value, f: F) -> Value {
    match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}
