//! The construction pipeline.
//!
//! Slow path, in order: path resolution → defaults → filters → inbound cast
//! → validation (accumulating every violation before failing) →
//! materialization, with eager computed fields evaluated last. Fast path:
//! direct extraction of each field by name, defaults and required-ness still
//! honored, nothing else.

use std::collections::HashMap;
use std::sync::Arc;

use remap_schema::{ComputedKind, FilterSpec, RecordSchema, parse_template};
use serde_json::{Map, Value};
use tracing::debug;

use crate::engine::{ConstructOptions, Engine};
use crate::error::{EngineError, EngineResult};
use crate::instance::Instance;
use crate::path::{Resolved, resolve};
use crate::rules::Violation;

pub(crate) fn construct(
    engine: &Engine,
    schema: &Arc<RecordSchema>,
    canonical: &Map<String, Value>,
    options: &ConstructOptions,
) -> EngineResult<Instance> {
    // The per-type verdict is structural; explicit per-call template or
    // filter overrides force the general pipeline regardless.
    if schema.capabilities().is_empty() && options.is_empty() {
        debug!(record_type = schema.record_type(), "constructing via fast path");
        fast(schema, canonical)
    } else {
        debug!(record_type = schema.record_type(), "constructing via slow path");
        slow(engine, schema, canonical, options)
    }
}

fn fast(schema: &Arc<RecordSchema>, canonical: &Map<String, Value>) -> EngineResult<Instance> {
    let mut values = Map::new();
    for field in schema.fields() {
        let value = match canonical.get(&field.name) {
            Some(v) => v.clone(),
            None => match &field.default {
                Some(d) => d.clone(),
                None if field.required => {
                    return Err(EngineError::RequiredFieldMissing {
                        field: field.name.clone(),
                    });
                }
                None => Value::Null,
            },
        };
        values.insert(field.name.clone(), value);
    }
    Ok(Instance::new(schema.clone(), values))
}

fn slow(
    engine: &Engine,
    schema: &Arc<RecordSchema>,
    canonical: &Map<String, Value>,
    options: &ConstructOptions,
) -> EngineResult<Instance> {
    // Explicit template entries are descriptors and validate like schema ones.
    let mut overrides: HashMap<&str, String> = HashMap::new();
    for (field, descriptor) in &options.template {
        overrides.insert(field.as_str(), parse_template(descriptor)?);
    }

    let mut values = Map::new();
    let mut violations: Vec<Violation> = Vec::new();

    for field in schema.fields() {
        // Source path precedence: per-call override, schema template, field name.
        let path: &str = overrides
            .get(field.name.as_str())
            .map(String::as_str)
            .or_else(|| schema.template_path(&field.name))
            .unwrap_or(&field.name);

        let (mut value, present) = match resolve(canonical, path) {
            Resolved::Found(v) => (v.clone(), true),
            Resolved::Absent => match &field.default {
                Some(d) => (d.clone(), true),
                None if field.required => {
                    return Err(EngineError::RequiredFieldMissing {
                        field: field.name.clone(),
                    });
                }
                None => (Value::Null, false),
            },
        };

        // An optional field that resolved to nothing stays a bare null;
        // filters, casts and rules only see actual values.
        if present {
            let chain: &[FilterSpec] = options
                .filters
                .get(&field.name)
                .map(Vec::as_slice)
                .unwrap_or_else(|| schema.filters_for(&field.name));
            value = engine.filters().apply_chain(&value, chain)?;

            if let Some(spec) = schema.cast_for(&field.name) {
                value = engine.casts().cast_in(&value, spec).map_err(|source| {
                    EngineError::CastFailure {
                        field: field.name.clone(),
                        source,
                    }
                })?;
            }

            for rule in schema.rules_for(&field.name) {
                if let Err(reason) = engine.rules().evaluate(&value, rule) {
                    violations.push(Violation {
                        field: field.name.clone(),
                        rule: rule.name.clone(),
                        reason,
                    });
                }
            }
        }

        values.insert(field.name.clone(), value);
    }

    // Every rule has run; report the complete set at once.
    if !violations.is_empty() {
        return Err(EngineError::ValidationFailed { violations });
    }

    for computed in schema.computed() {
        if computed.kind == ComputedKind::Eager {
            debug!(
                record_type = schema.record_type(),
                field = computed.name.as_str(),
                "evaluating eager computed field"
            );
            let derived = (computed.func)(&values);
            values.insert(computed.name.clone(), derived);
        }
    }

    Ok(Instance::new(schema.clone(), values))
}
