//! Schema registry with init-once caching.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use remap_schema::RecordSchema;

/// Registry of built schemas and memoized fast-path verdicts.
///
/// Both maps are write-once-per-type, read-many. Registration is a pure
/// function of the schema, so concurrent registration of the same type
/// converges: the first write wins and later writers get the stored value
/// back. An explicit registry object — passed by handle, never a process
/// global — so test suites construct isolated registries.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<RecordSchema>>>,
    fast_path: RwLock<HashMap<String, bool>>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a schema; first write per type wins.
    pub fn insert(&self, schema: RecordSchema) -> Arc<RecordSchema> {
        let mut schemas = self.schemas.write().unwrap_or_else(|e| e.into_inner());
        schemas
            .entry(schema.record_type().to_string())
            .or_insert_with(|| Arc::new(schema))
            .clone()
    }

    /// Looks up a registered schema.
    #[must_use]
    pub fn get(&self, record_type: &str) -> Option<Arc<RecordSchema>> {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas.get(record_type).cloned()
    }

    /// Returns true if the type is registered.
    #[must_use]
    pub fn contains(&self, record_type: &str) -> bool {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas.contains_key(record_type)
    }

    /// The memoized fast-path verdict for a type.
    ///
    /// Computed from the schema's capabilities on first call; the check is
    /// structural, so the verdict never changes for a registered type.
    #[must_use]
    pub fn fast_path(&self, record_type: &str) -> Option<bool> {
        {
            let cache = self.fast_path.read().unwrap_or_else(|e| e.into_inner());
            if let Some(&verdict) = cache.get(record_type) {
                return Some(verdict);
            }
        }
        let schema = self.get(record_type)?;
        let verdict = schema.capabilities().is_empty();
        let mut cache = self.fast_path.write().unwrap_or_else(|e| e.into_inner());
        Some(*cache.entry(record_type.to_string()).or_insert(verdict))
    }

    /// Registered type names, in no particular order.
    #[must_use]
    pub fn types(&self) -> Vec<String> {
        let schemas = self.schemas.read().unwrap_or_else(|e| e.into_inner());
        schemas.keys().cloned().collect()
    }
}
