use std::collections::HashMap;
use std::sync::Arc;

use remap_schema::CastSpec;
use serde_json::Value;

use crate::builtin;
use crate::error::{CastError, CastResult};

/// A named bidirectional converter.
///
/// `cast_in` turns a raw source value into its typed form; `cast_out` turns
/// the typed form back into a serializable value. Both must be pure functions
/// of their input plus the spec's params.
pub trait Cast: Send + Sync {
    fn cast_in(&self, raw: &Value, spec: &CastSpec) -> CastResult<Value>;
    fn cast_out(&self, typed: &Value, spec: &CastSpec) -> CastResult<Value>;
}

/// One enumerator of a registered enum: a name and its backing scalar.
#[derive(Debug, Clone)]
pub struct EnumVariant {
    pub name: String,
    pub value: Value,
}

/// A registered enum type for the `enum:Name` cast.
#[derive(Debug, Clone)]
pub struct EnumDef {
    name: String,
    variants: Vec<EnumVariant>,
}

impl EnumDef {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    /// Appends a variant with its backing scalar value.
    #[must_use]
    pub fn variant(mut self, name: &str, value: Value) -> Self {
        self.variants.push(EnumVariant {
            name: name.into(),
            value,
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn variants(&self) -> &[EnumVariant] {
        &self.variants
    }

    /// Finds the variant whose backing scalar matches `raw`.
    ///
    /// Matching is value equality, with one concession to text-typed sources
    /// (XML): a string raw matches a numeric backing value when it spells the
    /// same number.
    #[must_use]
    pub fn by_value(&self, raw: &Value) -> Option<&EnumVariant> {
        self.variants.iter().find(|v| {
            if v.value == *raw {
                return true;
            }
            matches!((&v.value, raw), (Value::Number(n), Value::String(s)) if n.to_string() == *s)
        })
    }
}

/// Registry of cast kinds and enum definitions.
///
/// Built-in kinds are installed by [`CastRegistry::with_builtins`]; custom
/// kinds register under a name. The `enum` kind resolves against the
/// registered [`EnumDef`] table.
pub struct CastRegistry {
    casts: HashMap<String, Arc<dyn Cast>>,
    enums: HashMap<String, EnumDef>,
}

impl CastRegistry {
    /// Creates an empty registry with no kinds at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            casts: HashMap::new(),
            enums: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in cast kinds installed.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        builtin::install(&mut registry);
        registry
    }

    /// Registers (or replaces) a cast kind.
    pub fn register(&mut self, kind: &str, cast: Arc<dyn Cast>) {
        self.casts.insert(kind.into(), cast);
    }

    /// Registers an enum type for the `enum:Name` cast.
    pub fn register_enum(&mut self, def: EnumDef) {
        self.enums.insert(def.name().to_string(), def);
    }

    /// Returns true if the kind is registered (`enum` counts as a kind).
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        kind == "enum" || self.casts.contains_key(kind)
    }

    /// Looks up a registered enum definition.
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&EnumDef> {
        self.enums.get(name)
    }

    /// Validates a spec without applying it, so misconfigured casts surface
    /// at schema-registration time rather than at first use.
    pub fn validate_spec(&self, spec: &CastSpec) -> CastResult<()> {
        if spec.kind == "enum" {
            let name = spec.first_param().ok_or_else(|| CastError::InvalidParam {
                kind: "enum".into(),
                reason: "missing enum type name".into(),
            })?;
            if !self.enums.contains_key(name) {
                return Err(CastError::UnknownEnum(name.into()));
            }
            return Ok(());
        }
        if !self.casts.contains_key(&spec.kind) {
            return Err(CastError::UnknownKind(spec.kind.clone()));
        }
        if spec.kind == "decimal" {
            spec.first_param()
                .and_then(|p| p.parse::<usize>().ok())
                .ok_or_else(|| CastError::InvalidParam {
                    kind: "decimal".into(),
                    reason: "digit count param required".into(),
                })?;
        }
        Ok(())
    }

    /// Applies the inbound transform for `spec` to a raw value.
    pub fn cast_in(&self, raw: &Value, spec: &CastSpec) -> CastResult<Value> {
        if spec.kind == "enum" {
            return self.enum_in(raw, spec);
        }
        let cast = self
            .casts
            .get(&spec.kind)
            .ok_or_else(|| CastError::UnknownKind(spec.kind.clone()))?;
        cast.cast_in(raw, spec)
    }

    /// Applies the outbound transform for `spec` to a typed value.
    pub fn cast_out(&self, typed: &Value, spec: &CastSpec) -> CastResult<Value> {
        if spec.kind == "enum" {
            // Typed form already is the backing scalar.
            return Ok(typed.clone());
        }
        let cast = self
            .casts
            .get(&spec.kind)
            .ok_or_else(|| CastError::UnknownKind(spec.kind.clone()))?;
        cast.cast_out(typed, spec)
    }

    fn enum_in(&self, raw: &Value, spec: &CastSpec) -> CastResult<Value> {
        let name = spec.first_param().ok_or_else(|| CastError::InvalidParam {
            kind: "enum".into(),
            reason: "missing enum type name".into(),
        })?;
        let def = self
            .enums
            .get(name)
            .ok_or_else(|| CastError::UnknownEnum(name.into()))?;
        let variant = def.by_value(raw).ok_or_else(|| CastError::Unparsable {
            kind: format!("enum:{name}"),
            raw: raw.clone(),
        })?;
        Ok(variant.value.clone())
    }
}

impl Default for CastRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
