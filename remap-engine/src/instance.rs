//! The immutable materialized record.

use std::sync::Arc;

use remap_schema::{ComputedKind, RecordSchema};
use serde_json::{Map, Value};

/// A constructed record.
///
/// Ownership of the values is exclusive to the instance: once constructed,
/// nothing mutates them in place. Diff and serialization only read. The
/// value map holds the declared fields in declaration order, followed by any
/// eager computed fields; lazy computed fields are evaluated on access and
/// never stored.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: Arc<RecordSchema>,
    values: Map<String, Value>,
}

impl Instance {
    pub(crate) fn new(schema: Arc<RecordSchema>, values: Map<String, Value>) -> Self {
        Self { schema, values }
    }

    /// The record type name.
    #[must_use]
    pub fn record_type(&self) -> &str {
        self.schema.record_type()
    }

    /// The schema this instance was constructed against.
    #[must_use]
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// A field's typed value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    /// All stored values (declared fields plus eager computed fields).
    #[must_use]
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Evaluates a computed field.
    ///
    /// Eager computed fields return their stored value; lazy ones are
    /// evaluated now, as a pure function of the stored values. Returns
    /// `None` for names that are not computed fields of this schema.
    #[must_use]
    pub fn computed(&self, name: &str) -> Option<Value> {
        let def = self.schema.computed().iter().find(|c| c.name == name)?;
        match def.kind {
            ComputedKind::Eager => self.values.get(name).cloned(),
            ComputedKind::Lazy => Some((def.func)(&self.values)),
        }
    }
}
