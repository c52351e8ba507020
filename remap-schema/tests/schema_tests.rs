use remap_schema::{
    Capabilities, CastSpec, DeclaredType, FieldDef, RecordSchema, SchemaError, parse_template,
};
use serde_json::json;

// ── FieldDef constructors ────────────────────────────────────────

#[test]
fn text_field_is_required_by_default() {
    let f = FieldDef::text("name");
    assert_eq!(f.name, "name");
    assert_eq!(f.declared_type, DeclaredType::Text);
    assert!(f.required);
    assert!(f.default.is_none());
}

#[test]
fn optional_field() {
    let f = FieldDef::integer("age").optional();
    assert_eq!(f.declared_type, DeclaredType::Integer);
    assert!(!f.required);
}

#[test]
fn field_with_default() {
    let f = FieldDef::float("score").with_default(json!(0.0));
    assert_eq!(f.default, Some(json!(0.0)));
}

#[test]
fn shorthands_cover_all_declared_types() {
    assert_eq!(FieldDef::boolean("a").declared_type, DeclaredType::Boolean);
    assert_eq!(FieldDef::map("b").declared_type, DeclaredType::Map);
    assert_eq!(FieldDef::list("c").declared_type, DeclaredType::List);
    assert_eq!(FieldDef::any("d").declared_type, DeclaredType::Any);
}

#[test]
fn declared_type_serde_uses_snake_case() {
    let json = serde_json::to_string(&DeclaredType::Boolean).unwrap();
    assert_eq!(json, "\"boolean\"");
}

#[test]
fn field_def_serde_roundtrip() {
    let original = FieldDef::text("title").with_default(json!("untitled"));
    let text = serde_json::to_string(&original).unwrap();
    let parsed: FieldDef = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.name, original.name);
    assert_eq!(parsed.declared_type, original.declared_type);
    assert_eq!(parsed.default, original.default);
    assert_eq!(parsed.required, original.required);
}

// ── CastSpec parsing ─────────────────────────────────────────────

#[test]
fn bare_kind_has_no_params() {
    let spec = CastSpec::parse("boolean").unwrap();
    assert_eq!(spec.kind, "boolean");
    assert!(spec.params.is_empty());
}

#[test]
fn kind_with_one_param() {
    let spec = CastSpec::parse("decimal:2").unwrap();
    assert_eq!(spec.kind, "decimal");
    assert_eq!(spec.params, vec!["2"]);
}

#[test]
fn params_with_colons_rejoin() {
    let spec = CastSpec::parse("datetime:%H:%M:%S").unwrap();
    assert_eq!(spec.kind, "datetime");
    assert_eq!(spec.params, vec!["%H", "%M", "%S"]);
    assert_eq!(spec.params_joined(), "%H:%M:%S");
}

#[test]
fn empty_descriptor_is_rejected() {
    assert!(matches!(
        CastSpec::parse(""),
        Err(SchemaError::InvalidCastDescriptor(_))
    ));
}

// ── Template descriptors ─────────────────────────────────────────

#[test]
fn template_extracts_dot_path() {
    assert_eq!(parse_template("{{ address.city }}").unwrap(), "address.city");
}

#[test]
fn template_without_spaces() {
    assert_eq!(parse_template("{{name}}").unwrap(), "name");
}

#[test]
fn plain_string_is_not_a_template() {
    assert!(matches!(
        parse_template("address.city"),
        Err(SchemaError::InvalidTemplate(_))
    ));
}

#[test]
fn empty_template_is_rejected() {
    assert!(matches!(
        parse_template("{{ }}"),
        Err(SchemaError::InvalidTemplate(_))
    ));
}

// ── Builder ──────────────────────────────────────────────────────

fn user_schema() -> RecordSchema {
    RecordSchema::builder("user")
        .field(FieldDef::text("name"))
        .field(FieldDef::integer("age"))
        .build()
        .unwrap()
}

#[test]
fn builder_preserves_field_order() {
    let schema = user_schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["name", "age"]);
}

#[test]
fn schema_without_fields_is_rejected() {
    assert!(matches!(
        RecordSchema::builder("empty").build(),
        Err(SchemaError::Empty(_))
    ));
}

#[test]
fn duplicate_field_is_rejected() {
    let result = RecordSchema::builder("user")
        .field(FieldDef::text("name"))
        .field(FieldDef::text("name"))
        .build();
    assert!(matches!(result, Err(SchemaError::DuplicateField(f)) if f == "name"));
}

#[test]
fn hook_on_unknown_field_is_rejected() {
    let result = RecordSchema::builder("user")
        .field(FieldDef::text("name"))
        .cast("agee", "integer")
        .build();
    assert!(matches!(
        result,
        Err(SchemaError::UnknownField { hook: "casts", .. })
    ));
}

#[test]
fn computed_name_may_not_shadow_a_field() {
    let result = RecordSchema::builder("user")
        .field(FieldDef::text("name"))
        .computed("name", |_| json!("x"))
        .build();
    assert!(matches!(result, Err(SchemaError::DuplicateField(_))));
}

#[test]
fn builder_parses_casts_and_templates() {
    let schema = RecordSchema::builder("order")
        .field(FieldDef::text("total"))
        .field(FieldDef::text("city"))
        .cast("total", "decimal:2")
        .template("city", "{{ address.city }}")
        .build()
        .unwrap();
    assert_eq!(schema.cast_for("total").unwrap().kind, "decimal");
    assert_eq!(schema.template_path("city"), Some("address.city"));
    assert_eq!(schema.template_path("total"), None);
}

#[test]
fn rules_and_filters_accumulate_in_order() {
    let schema = RecordSchema::builder("user")
        .field(FieldDef::text("name"))
        .filter("name", "trim")
        .filter("name", "lowercase")
        .rule("name", "min_len:1")
        .rule("name", "max_len:64")
        .build()
        .unwrap();
    let filters: Vec<&str> = schema
        .filters_for("name")
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(filters, vec!["trim", "lowercase"]);
    let rules: Vec<&str> = schema
        .rules_for("name")
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(rules, vec!["min_len", "max_len"]);
}

// ── Capabilities ─────────────────────────────────────────────────

#[test]
fn no_hooks_means_no_capabilities() {
    assert!(user_schema().capabilities().is_empty());
}

#[test]
fn each_hook_sets_its_capability() {
    let with_cast = RecordSchema::builder("t")
        .field(FieldDef::text("a"))
        .cast("a", "integer")
        .build()
        .unwrap();
    assert!(with_cast.capabilities().contains(Capabilities::CASTS));
    assert!(!with_cast.capabilities().contains(Capabilities::RULES));

    let with_template = RecordSchema::builder("t")
        .field(FieldDef::text("a"))
        .template("a", "{{ b.a }}")
        .build()
        .unwrap();
    assert!(with_template.capabilities().contains(Capabilities::TEMPLATE));

    let with_rule = RecordSchema::builder("t")
        .field(FieldDef::text("a"))
        .rule("a", "min_len:1")
        .build()
        .unwrap();
    assert!(with_rule.capabilities().contains(Capabilities::RULES));

    let with_filter = RecordSchema::builder("t")
        .field(FieldDef::text("a"))
        .filter("a", "trim")
        .build()
        .unwrap();
    assert!(with_filter.capabilities().contains(Capabilities::FILTERS));

    let with_computed = RecordSchema::builder("t")
        .field(FieldDef::text("a"))
        .computed("b", |_| json!(1))
        .build()
        .unwrap();
    assert!(with_computed.capabilities().contains(Capabilities::COMPUTED));
}

#[test]
fn capabilities_union() {
    let caps = Capabilities::CASTS.union(Capabilities::RULES);
    assert!(caps.contains(Capabilities::CASTS));
    assert!(caps.contains(Capabilities::RULES));
    assert!(!caps.contains(Capabilities::TEMPLATE));
    assert!(!caps.is_empty());
}

#[test]
fn capabilities_debug_lists_set_flags() {
    let mut caps = Capabilities::NONE;
    caps.insert(Capabilities::FILTERS);
    let rendered = format!("{caps:?}");
    assert!(rendered.contains("filters"));
    assert!(!rendered.contains("casts"));
}
