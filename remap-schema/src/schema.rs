use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::capabilities::Capabilities;
use crate::cast_spec::CastSpec;
use crate::error::{SchemaError, SchemaResult};
use crate::field::FieldDef;

/// A parsed validation-rule descriptor, e.g. `"gte:0"` or `"one_of:a:b"`.
///
/// Same colon-delimited grammar as [`CastSpec`]; rules whose one parameter
/// may contain colons (regexes) re-join via [`RuleSpec::params_joined`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub params: Vec<String>,
}

impl RuleSpec {
    /// Parses a rule descriptor string.
    pub fn parse(descriptor: &str) -> SchemaResult<Self> {
        let mut parts = descriptor.split(':');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(SchemaError::InvalidCastDescriptor(descriptor.into()));
        }
        Ok(Self {
            name: name.to_string(),
            params: parts.map(str::to_string).collect(),
        })
    }

    /// The params re-joined with `:`.
    #[must_use]
    pub fn params_joined(&self) -> String {
        self.params.join(":")
    }
}

/// A named filter reference applied before casting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub name: String,
}

impl FilterSpec {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }
}

/// A derived-field function: a pure function of the other field values.
pub type ComputedFn = Arc<dyn Fn(&Map<String, Value>) -> Value + Send + Sync>;

/// When a computed field is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputedKind {
    /// Evaluated at construction and stored on the instance; appears in the
    /// canonical map. Superseded by lazy computed fields.
    Eager,
    /// Evaluated on access; never part of the canonical map.
    Lazy,
}

/// A declared computed field.
#[derive(Clone)]
pub struct ComputedField {
    pub name: String,
    pub kind: ComputedKind,
    pub func: ComputedFn,
}

impl fmt::Debug for ComputedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputedField")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Extracts the dot path from a `"{{ path.to.field }}"` template descriptor.
///
/// Anything not wrapped in the delimiters, or with an empty path between
/// them, is an invalid template entry.
pub fn parse_template(descriptor: &str) -> SchemaResult<String> {
    let trimmed = descriptor.trim();
    let inner = trimmed
        .strip_prefix("{{")
        .and_then(|s| s.strip_suffix("}}"))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SchemaError::InvalidTemplate(descriptor.into()))?;
    Ok(inner.to_string())
}

/// The fixed schema for one record type.
///
/// Built once through [`SchemaBuilder`], then immutable: the field list, hook
/// declarations and [`Capabilities`] never change across instances.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    record_type: String,
    fields: Vec<FieldDef>,
    casts: HashMap<String, CastSpec>,
    template: HashMap<String, String>,
    rules: HashMap<String, Vec<RuleSpec>>,
    filters: HashMap<String, Vec<FilterSpec>>,
    computed: Vec<ComputedField>,
    capabilities: Capabilities,
}

impl RecordSchema {
    /// Starts a builder for the given record type name.
    #[must_use]
    pub fn builder(record_type: &str) -> SchemaBuilder {
        SchemaBuilder::new(record_type)
    }

    /// The record type name.
    #[must_use]
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// The ordered field list.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All declared casts, keyed by field name.
    #[must_use]
    pub fn casts(&self) -> &HashMap<String, CastSpec> {
        &self.casts
    }

    /// The cast declared for a field, if any.
    #[must_use]
    pub fn cast_for(&self, field: &str) -> Option<&CastSpec> {
        self.casts.get(field)
    }

    /// The declared source path for a field, if any.
    #[must_use]
    pub fn template_path(&self, field: &str) -> Option<&str> {
        self.template.get(field).map(String::as_str)
    }

    /// The rules declared for a field.
    #[must_use]
    pub fn rules_for(&self, field: &str) -> &[RuleSpec] {
        self.rules.get(field).map_or(&[], Vec::as_slice)
    }

    /// All declared rules, keyed by field name.
    #[must_use]
    pub fn rules(&self) -> &HashMap<String, Vec<RuleSpec>> {
        &self.rules
    }

    /// The filter chain declared for a field.
    #[must_use]
    pub fn filters_for(&self, field: &str) -> &[FilterSpec] {
        self.filters.get(field).map_or(&[], Vec::as_slice)
    }

    /// All declared filters, keyed by field name.
    #[must_use]
    pub fn filters(&self) -> &HashMap<String, Vec<FilterSpec>> {
        &self.filters
    }

    /// The declared computed fields, in declaration order.
    #[must_use]
    pub fn computed(&self) -> &[ComputedField] {
        &self.computed
    }

    /// The hook capabilities computed at build time.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

/// Registration API for [`RecordSchema`].
///
/// Descriptor strings (casts, templates, rules) are parsed and validated at
/// [`build`](SchemaBuilder::build); referencing an undeclared field in any
/// hook is an error there, so misdeclared schemas never reach the pipeline.
pub struct SchemaBuilder {
    record_type: String,
    fields: Vec<FieldDef>,
    casts: Vec<(String, String)>,
    template: Vec<(String, String)>,
    rules: Vec<(String, String)>,
    filters: Vec<(String, String)>,
    computed: Vec<ComputedField>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new(record_type: &str) -> Self {
        Self {
            record_type: record_type.into(),
            fields: Vec::new(),
            casts: Vec::new(),
            template: Vec::new(),
            rules: Vec::new(),
            filters: Vec::new(),
            computed: Vec::new(),
        }
    }

    /// Appends a field. Field order is declaration order everywhere
    /// downstream (canonical map, CSV columns, diff output).
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares a cast for a field, e.g. `"decimal:2"`.
    #[must_use]
    pub fn cast(mut self, field: &str, descriptor: &str) -> Self {
        self.casts.push((field.into(), descriptor.into()));
        self
    }

    /// Declares a source path for a field, e.g. `"{{ address.city }}"`.
    #[must_use]
    pub fn template(mut self, field: &str, descriptor: &str) -> Self {
        self.template.push((field.into(), descriptor.into()));
        self
    }

    /// Appends a validation rule for a field, e.g. `"gte:0"`.
    #[must_use]
    pub fn rule(mut self, field: &str, descriptor: &str) -> Self {
        self.rules.push((field.into(), descriptor.into()));
        self
    }

    /// Appends a filter to a field's chain; chains run in declaration order.
    #[must_use]
    pub fn filter(mut self, field: &str, name: &str) -> Self {
        self.filters.push((field.into(), name.into()));
        self
    }

    /// Declares a lazily-evaluated computed field.
    #[must_use]
    pub fn computed<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        self.computed.push(ComputedField {
            name: name.into(),
            kind: ComputedKind::Lazy,
            func: Arc::new(func),
        });
        self
    }

    /// Declares an eagerly-evaluated computed field that is stored on the
    /// instance and appears in the canonical map.
    #[deprecated(note = "eager computed fields are legacy; use `computed` for lazy accessors")]
    #[must_use]
    pub fn computed_eager<F>(mut self, name: &str, func: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Value + Send + Sync + 'static,
    {
        self.computed.push(ComputedField {
            name: name.into(),
            kind: ComputedKind::Eager,
            func: Arc::new(func),
        });
        self
    }

    /// Validates the declarations and produces the immutable schema.
    pub fn build(self) -> SchemaResult<RecordSchema> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty(self.record_type));
        }

        let mut names: Vec<&str> = Vec::with_capacity(self.fields.len());
        for f in &self.fields {
            if names.contains(&f.name.as_str()) {
                return Err(SchemaError::DuplicateField(f.name.clone()));
            }
            names.push(&f.name);
        }
        for c in &self.computed {
            if names.contains(&c.name.as_str()) {
                return Err(SchemaError::DuplicateField(c.name.clone()));
            }
        }

        let known = |hook: &'static str, field: &str| -> SchemaResult<()> {
            if names.contains(&field) {
                Ok(())
            } else {
                Err(SchemaError::UnknownField {
                    hook,
                    field: field.into(),
                })
            }
        };

        let mut casts = HashMap::new();
        for (field, descriptor) in &self.casts {
            known("casts", field)?;
            casts.insert(field.clone(), CastSpec::parse(descriptor)?);
        }

        let mut template = HashMap::new();
        for (field, descriptor) in &self.template {
            known("template", field)?;
            template.insert(field.clone(), parse_template(descriptor)?);
        }

        let mut rules: HashMap<String, Vec<RuleSpec>> = HashMap::new();
        for (field, descriptor) in &self.rules {
            known("rules", field)?;
            rules
                .entry(field.clone())
                .or_default()
                .push(RuleSpec::parse(descriptor)?);
        }

        let mut filters: HashMap<String, Vec<FilterSpec>> = HashMap::new();
        for (field, name) in &self.filters {
            known("filters", field)?;
            filters
                .entry(field.clone())
                .or_default()
                .push(FilterSpec::new(name));
        }

        let mut capabilities = Capabilities::NONE;
        if !casts.is_empty() {
            capabilities.insert(Capabilities::CASTS);
        }
        if !template.is_empty() {
            capabilities.insert(Capabilities::TEMPLATE);
        }
        if !rules.is_empty() {
            capabilities.insert(Capabilities::RULES);
        }
        if !filters.is_empty() {
            capabilities.insert(Capabilities::FILTERS);
        }
        if !self.computed.is_empty() {
            capabilities.insert(Capabilities::COMPUTED);
        }

        Ok(RecordSchema {
            record_type: self.record_type,
            fields: self.fields,
            casts,
            template,
            rules,
            filters,
            computed: self.computed,
            capabilities,
        })
    }
}
