//! Property tests for the scalar cast pairs.
//!
//! For `boolean`, `integer`, `float` and `string`, casting in, emitting back
//! out and casting in again must land on the same typed value as the first
//! inbound cast — the pair is idempotent for any scalar input.

use proptest::prelude::*;
use remap_cast::CastRegistry;
use remap_schema::CastSpec;
use serde_json::{Value, json};

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(Value::from),
        "[a-zA-Z0-9 .-]{0,20}".prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn idempotent_for(kind: &str, raw: &Value) -> bool {
    let registry = CastRegistry::with_builtins();
    let spec = CastSpec::parse(kind).unwrap();
    let first = registry.cast_in(raw, &spec).unwrap();
    let emitted = registry.cast_out(&first, &spec).unwrap();
    let second = registry.cast_in(&emitted, &spec).unwrap();
    first == second
}

proptest! {
    #[test]
    fn boolean_cast_pair_is_idempotent(raw in scalar_strategy()) {
        prop_assert!(idempotent_for("boolean", &raw));
    }

    #[test]
    fn integer_cast_pair_is_idempotent(raw in scalar_strategy()) {
        prop_assert!(idempotent_for("integer", &raw));
    }

    #[test]
    fn float_cast_pair_is_idempotent(raw in scalar_strategy()) {
        prop_assert!(idempotent_for("float", &raw));
    }

    #[test]
    fn string_cast_pair_is_idempotent(raw in scalar_strategy()) {
        prop_assert!(idempotent_for("string", &raw));
    }

    #[test]
    fn decimal_formatting_has_exact_digit_count(
        int_part in 0u64..1_000_000,
        frac in "[0-9]{0,8}",
        digits in 0usize..5,
    ) {
        let raw = if frac.is_empty() {
            json!(format!("{int_part}"))
        } else {
            json!(format!("{int_part}.{frac}"))
        };
        let registry = CastRegistry::with_builtins();
        let spec = CastSpec::parse(&format!("decimal:{digits}")).unwrap();
        let typed = registry.cast_in(&raw, &spec).unwrap();
        let out = registry.cast_out(&typed, &spec).unwrap();
        let text = out.as_str().unwrap();
        if digits == 0 {
            prop_assert!(!text.contains('.'));
        } else {
            let (_, fraction) = text.split_once('.').unwrap();
            prop_assert_eq!(fraction.len(), digits);
        }
    }
}
