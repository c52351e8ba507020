//! The engine facade: registries, registration-time validation, and the
//! exposed operations (`construct`, `can_use_fast_path`, `to_canonical_map`,
//! `normalize`).

use std::collections::HashMap;
use std::sync::Arc;

use remap_cast::{CastError, CastRegistry, FilterRegistry};
use remap_schema::{ComputedKind, FilterSpec, RecordSchema};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{EngineError, EngineResult, SourceError};
use crate::instance::Instance;
use crate::pipeline;
use crate::registry::SchemaRegistry;
use crate::rules::{BasicRules, RuleEvaluator};
use crate::source::{self, Source};

/// Per-call overrides for one construction.
///
/// `template` entries are `"{{ path.to.field }}"` descriptors and take
/// precedence over the schema's own paths; `filters` chains take precedence
/// over schema-declared chains. Any override forces the general pipeline.
#[derive(Default)]
pub struct ConstructOptions {
    pub template: HashMap<String, String>,
    pub filters: HashMap<String, Vec<FilterSpec>>,
}

impl ConstructOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty() && self.filters.is_empty()
    }
}

/// The mapping engine.
///
/// Owns the schema registry (init-once caches), the cast and filter
/// registries, and the rule evaluator. Stateless across calls apart from
/// those caches; instances it produces are immutable and freely shared.
pub struct Engine {
    schemas: SchemaRegistry,
    casts: CastRegistry,
    filters: FilterRegistry,
    rules: Arc<dyn RuleEvaluator>,
}

impl Engine {
    /// Creates an engine with built-in casts, filters and [`BasicRules`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: SchemaRegistry::new(),
            casts: CastRegistry::with_builtins(),
            filters: FilterRegistry::with_builtins(),
            rules: Arc::new(BasicRules),
        }
    }

    /// Creates an engine with a caller-supplied rule evaluator.
    #[must_use]
    pub fn with_rules(rules: Arc<dyn RuleEvaluator>) -> Self {
        Self {
            rules,
            ..Self::new()
        }
    }

    /// The cast registry.
    #[must_use]
    pub fn casts(&self) -> &CastRegistry {
        &self.casts
    }

    /// Mutable cast registry, for registering custom kinds and enums before
    /// schemas that use them.
    pub fn casts_mut(&mut self) -> &mut CastRegistry {
        &mut self.casts
    }

    /// The filter registry.
    #[must_use]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Mutable filter registry.
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// The rule evaluator.
    #[must_use]
    pub fn rules(&self) -> &dyn RuleEvaluator {
        self.rules.as_ref()
    }

    /// The schema registry.
    #[must_use]
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Registers a schema after cross-validating its hook declarations.
    ///
    /// Unknown cast kinds, unknown enum type names and unknown filter names
    /// fail here — at introspection time — never at first use. First
    /// registration per type wins; re-registering the same type returns the
    /// stored schema.
    pub fn register_schema(&self, schema: RecordSchema) -> EngineResult<Arc<RecordSchema>> {
        for spec in schema.casts().values() {
            self.casts.validate_spec(spec)?;
        }
        for chain in schema.filters().values() {
            for filter in chain {
                if !self.filters.contains(&filter.name) {
                    return Err(EngineError::CastConfig(CastError::UnknownFilter(
                        filter.name.clone(),
                    )));
                }
            }
        }
        debug!(
            record_type = schema.record_type(),
            capabilities = ?schema.capabilities(),
            "registering schema"
        );
        Ok(self.schemas.insert(schema))
    }

    /// Looks up a registered schema.
    pub fn schema(&self, record_type: &str) -> EngineResult<Arc<RecordSchema>> {
        self.schemas
            .get(record_type)
            .ok_or_else(|| EngineError::UnknownType(record_type.into()))
    }

    /// The memoized structural fast-path verdict for a type.
    pub fn can_use_fast_path(&self, record_type: &str) -> EngineResult<bool> {
        self.schemas
            .fast_path(record_type)
            .ok_or_else(|| EngineError::UnknownType(record_type.into()))
    }

    /// Constructs an instance from a source with no per-call overrides.
    pub fn construct(&self, record_type: &str, source: Source<'_>) -> EngineResult<Instance> {
        self.construct_with(record_type, source, &ConstructOptions::default())
    }

    /// Constructs an instance with per-call template/filter overrides.
    pub fn construct_with(
        &self,
        record_type: &str,
        source: Source<'_>,
        options: &ConstructOptions,
    ) -> EngineResult<Instance> {
        let schema = self.schema(record_type)?;
        let canonical = self.normalize(source)?;
        pipeline::construct(self, &schema, &canonical, options)
    }

    /// Normalizes any accepted source into the canonical nested map.
    pub fn normalize(&self, source: Source<'_>) -> EngineResult<Map<String, Value>> {
        match source {
            Source::Value(value) => Ok(source::normalize_value(value)?),
            Source::Json(text) => Ok(source::normalize_json(text)?),
            Source::Xml(text) => Ok(source::normalize_xml(text)?),
            Source::Instance(instance) => self.to_canonical_map(instance),
            Source::Foreign(foreign) => Ok(foreign
                .to_canonical_map()
                .map_err(SourceError::Foreign)?),
        }
    }

    /// Produces the canonical map of an instance: outbound casts applied per
    /// field, declaration order, eager computed fields appended.
    pub fn to_canonical_map(&self, instance: &Instance) -> EngineResult<Map<String, Value>> {
        let schema = instance.schema();
        let mut out = Map::new();
        for field in schema.fields() {
            let value = instance.get(&field.name).cloned().unwrap_or(Value::Null);
            // A null from an optional, unresolved field never out-casts.
            let value = match schema.cast_for(&field.name) {
                Some(spec) if !value.is_null() => self
                    .casts
                    .cast_out(&value, spec)
                    .map_err(|source| EngineError::CastFailure {
                        field: field.name.clone(),
                        source,
                    })?,
                _ => value,
            };
            out.insert(field.name.clone(), value);
        }
        for computed in schema.computed() {
            if computed.kind == ComputedKind::Eager {
                let value = instance.get(&computed.name).cloned().unwrap_or(Value::Null);
                out.insert(computed.name.clone(), value);
            }
        }
        Ok(out)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
