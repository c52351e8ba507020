use remap_cast::{CastError, CastRegistry, EnumDef, format_decimal};
use remap_schema::CastSpec;
use serde_json::json;

fn registry() -> CastRegistry {
    CastRegistry::with_builtins()
}

fn spec(descriptor: &str) -> CastSpec {
    CastSpec::parse(descriptor).unwrap()
}

// ── datetime ─────────────────────────────────────────────────────

#[test]
fn datetime_roundtrips_with_default_format() {
    let r = registry();
    let s = spec("datetime");
    let typed = r.cast_in(&json!("2024-03-05 10:30:00"), &s).unwrap();
    assert!(typed.is_number());
    let back = r.cast_out(&typed, &s).unwrap();
    assert_eq!(back, json!("2024-03-05 10:30:00"));
}

#[test]
fn datetime_custom_format_with_colons() {
    let r = registry();
    let s = spec("datetime:%d/%m/%Y %H:%M");
    let typed = r.cast_in(&json!("05/03/2024 10:30"), &s).unwrap();
    let back = r.cast_out(&typed, &s).unwrap();
    assert_eq!(back, json!("05/03/2024 10:30"));
}

#[test]
fn datetime_date_only_format() {
    let r = registry();
    let s = spec("datetime:%Y-%m-%d");
    let typed = r.cast_in(&json!("2024-03-05"), &s).unwrap();
    let back = r.cast_out(&typed, &s).unwrap();
    assert_eq!(back, json!("2024-03-05"));
}

#[test]
fn datetime_accepts_epoch_numbers() {
    let r = registry();
    let s = spec("datetime");
    assert_eq!(r.cast_in(&json!(0), &s).unwrap(), json!(0));
    assert_eq!(r.cast_out(&json!(0), &s).unwrap(), json!("1970-01-01 00:00:00"));
}

#[test]
fn datetime_rejects_garbage() {
    let r = registry();
    let err = r.cast_in(&json!("not a date"), &spec("datetime")).unwrap_err();
    assert!(matches!(err, CastError::Unparsable { kind, .. } if kind == "datetime"));
}

// ── decimal ──────────────────────────────────────────────────────

#[test]
fn decimal_keeps_full_precision_inbound() {
    let r = registry();
    let typed = r.cast_in(&json!("1234.5678"), &spec("decimal:2")).unwrap();
    assert_eq!(typed, json!("1234.5678"));
}

#[test]
fn decimal_formats_to_exact_digit_count() {
    let r = registry();
    let out = r.cast_out(&json!("1234.5678"), &spec("decimal:2")).unwrap();
    assert_eq!(out, json!("1234.57"));
}

#[test]
fn decimal_pads_missing_fraction_digits() {
    let r = registry();
    let out = r.cast_out(&json!("7"), &spec("decimal:3")).unwrap();
    assert_eq!(out, json!("7.000"));
}

#[test]
fn decimal_rejects_non_numeric_strings() {
    let r = registry();
    let err = r.cast_in(&json!("12.3.4"), &spec("decimal:2")).unwrap_err();
    assert!(matches!(err, CastError::Unparsable { kind, .. } if kind == "decimal"));
}

#[test]
fn decimal_accepts_numbers() {
    let r = registry();
    let typed = r.cast_in(&json!(12.5), &spec("decimal:2")).unwrap();
    assert_eq!(r.cast_out(&typed, &spec("decimal:2")).unwrap(), json!("12.50"));
}

// ── format_decimal rounding ──────────────────────────────────────

#[test]
fn half_up_rounding_carries() {
    assert_eq!(format_decimal("9.999", 2).unwrap(), "10.00");
    assert_eq!(format_decimal("0.005", 2).unwrap(), "0.01");
    assert_eq!(format_decimal("1.004", 2).unwrap(), "1.00");
}

#[test]
fn zero_fraction_digits() {
    assert_eq!(format_decimal("1234.5678", 0).unwrap(), "1235");
    assert_eq!(format_decimal("0.4", 0).unwrap(), "0");
}

#[test]
fn negative_values_keep_their_sign() {
    assert_eq!(format_decimal("-1.005", 2).unwrap(), "-1.01");
    assert_eq!(format_decimal("-0.004", 2).unwrap(), "0.00");
}

#[test]
fn bare_fraction_and_trailing_point() {
    assert_eq!(format_decimal(".5", 2).unwrap(), "0.50");
    assert_eq!(format_decimal("7.", 1).unwrap(), "7.0");
}

// ── boolean ──────────────────────────────────────────────────────

#[test]
fn boolean_token_coercion() {
    let r = registry();
    let s = spec("boolean");
    for raw in ["1", "true", "on", "yes", "TRUE"] {
        assert_eq!(r.cast_in(&json!(raw), &s).unwrap(), json!(true), "{raw}");
    }
    for raw in ["0", "false", "off", "no", ""] {
        assert_eq!(r.cast_in(&json!(raw), &s).unwrap(), json!(false), "{raw}");
    }
}

#[test]
fn boolean_numeric_and_null_coercion() {
    let r = registry();
    let s = spec("boolean");
    assert_eq!(r.cast_in(&json!(0), &s).unwrap(), json!(false));
    assert_eq!(r.cast_in(&json!(7), &s).unwrap(), json!(true));
    assert_eq!(r.cast_in(&json!(null), &s).unwrap(), json!(false));
}

#[test]
fn boolean_emits_one_and_zero() {
    let r = registry();
    let s = spec("boolean");
    assert_eq!(r.cast_out(&json!(true), &s).unwrap(), json!(1));
    assert_eq!(r.cast_out(&json!(false), &s).unwrap(), json!(0));
}

// ── integer / float / string ─────────────────────────────────────

#[test]
fn integer_coercion_is_total() {
    let r = registry();
    let s = spec("integer");
    assert_eq!(r.cast_in(&json!("42"), &s).unwrap(), json!(42));
    assert_eq!(r.cast_in(&json!("3.9"), &s).unwrap(), json!(3));
    assert_eq!(r.cast_in(&json!(true), &s).unwrap(), json!(1));
    assert_eq!(r.cast_in(&json!("garbage"), &s).unwrap(), json!(0));
}

#[test]
fn float_coercion() {
    let r = registry();
    let s = spec("float");
    assert_eq!(r.cast_in(&json!("2.5"), &s).unwrap(), json!(2.5));
    assert_eq!(r.cast_in(&json!(3), &s).unwrap(), json!(3.0));
}

#[test]
fn string_coercion() {
    let r = registry();
    let s = spec("string");
    assert_eq!(r.cast_in(&json!(30), &s).unwrap(), json!("30"));
    assert_eq!(r.cast_in(&json!(true), &s).unwrap(), json!("true"));
    assert_eq!(r.cast_in(&json!(null), &s).unwrap(), json!(""));
    assert_eq!(
        r.cast_in(&json!({"a": 1}), &s).unwrap(),
        json!("{\"a\":1}")
    );
}

// ── array / json ─────────────────────────────────────────────────

#[test]
fn array_wraps_scalars_and_passes_containers() {
    let r = registry();
    let s = spec("array");
    assert_eq!(r.cast_in(&json!([1, 2]), &s).unwrap(), json!([1, 2]));
    assert_eq!(r.cast_in(&json!("x"), &s).unwrap(), json!(["x"]));
    assert_eq!(r.cast_in(&json!(null), &s).unwrap(), json!([]));
}

#[test]
fn array_serializes_to_compact_json() {
    let r = registry();
    let out = r.cast_out(&json!([1, 2]), &spec("array")).unwrap();
    assert_eq!(out, json!("[1,2]"));
}

#[test]
fn json_parses_text_and_rejects_garbage() {
    let r = registry();
    let s = spec("json");
    assert_eq!(
        r.cast_in(&json!("{\"a\":[1,2]}"), &s).unwrap(),
        json!({"a": [1, 2]})
    );
    assert!(matches!(
        r.cast_in(&json!("{not json"), &s),
        Err(CastError::Unparsable { .. })
    ));
    assert_eq!(r.cast_out(&json!({"a": 1}), &s).unwrap(), json!("{\"a\":1}"));
}

// ── enum ─────────────────────────────────────────────────────────

fn registry_with_status() -> CastRegistry {
    let mut r = registry();
    r.register_enum(
        EnumDef::new("Status")
            .variant("Draft", json!("draft"))
            .variant("Sent", json!("sent"))
            .variant("Paid", json!(2)),
    );
    r
}

#[test]
fn enum_matches_backing_scalar() {
    let r = registry_with_status();
    let s = spec("enum:Status");
    assert_eq!(r.cast_in(&json!("draft"), &s).unwrap(), json!("draft"));
    assert_eq!(r.cast_in(&json!(2), &s).unwrap(), json!(2));
}

#[test]
fn enum_matches_numeric_backing_from_text_sources() {
    let r = registry_with_status();
    assert_eq!(r.cast_in(&json!("2"), &spec("enum:Status")).unwrap(), json!(2));
}

#[test]
fn enum_rejects_unknown_values() {
    let r = registry_with_status();
    let err = r.cast_in(&json!("archived"), &spec("enum:Status")).unwrap_err();
    assert!(matches!(err, CastError::Unparsable { kind, .. } if kind == "enum:Status"));
}

#[test]
fn enum_out_is_the_backing_scalar() {
    let r = registry_with_status();
    assert_eq!(r.cast_out(&json!("sent"), &spec("enum:Status")).unwrap(), json!("sent"));
}

// ── spec validation ──────────────────────────────────────────────

#[test]
fn unknown_kind_fails_validation() {
    let err = registry().validate_spec(&spec("uuid")).unwrap_err();
    assert!(matches!(err, CastError::UnknownKind(k) if k == "uuid"));
}

#[test]
fn decimal_without_digits_fails_validation() {
    let err = registry().validate_spec(&spec("decimal")).unwrap_err();
    assert!(matches!(err, CastError::InvalidParam { .. }));
}

#[test]
fn enum_without_registration_fails_validation() {
    let err = registry().validate_spec(&spec("enum:Missing")).unwrap_err();
    assert!(matches!(err, CastError::UnknownEnum(n) if n == "Missing"));
}

#[test]
fn registered_enum_passes_validation() {
    assert!(registry_with_status().validate_spec(&spec("enum:Status")).is_ok());
}
