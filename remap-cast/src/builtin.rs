//! Built-in cast kinds.
//!
//! Typed forms are `serde_json::Value`s: datetimes become epoch-second
//! numbers, decimals stay as full-precision strings, enums hold their
//! backing scalar. The scalar coercions (`boolean`, `integer`, `float`,
//! `string`, `array`) are total; `datetime`, `decimal` and `json` fail on
//! unparsable input.

use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use remap_schema::CastSpec;
use serde_json::{Number, Value, json};

use crate::decimal::{format_decimal, split_decimal};
use crate::error::{CastError, CastResult};
use crate::registry::{Cast, CastRegistry};

const DATETIME_DEFAULT_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Installs every built-in kind into the registry.
pub(crate) fn install(registry: &mut CastRegistry) {
    registry.register("datetime", Arc::new(DatetimeCast));
    registry.register("decimal", Arc::new(DecimalCast));
    registry.register("boolean", Arc::new(BooleanCast));
    registry.register("integer", Arc::new(IntegerCast));
    registry.register("float", Arc::new(FloatCast));
    registry.register("string", Arc::new(StringCast));
    registry.register("array", Arc::new(ArrayCast));
    registry.register("json", Arc::new(JsonCast));
}

fn unparsable(kind: &str, raw: &Value) -> CastError {
    CastError::Unparsable {
        kind: kind.into(),
        raw: raw.clone(),
    }
}

/// Truthiness used by the `boolean` cast: recognized string tokens first,
/// then emptiness of the value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => true,
            "0" | "false" | "off" | "no" | "" => false,
            _ => true,
        },
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

struct DatetimeCast;

impl DatetimeCast {
    fn fmt(spec: &CastSpec) -> String {
        if spec.params.is_empty() {
            DATETIME_DEFAULT_FMT.to_string()
        } else {
            // strftime formats contain colons, so the descriptor's split
            // params are rejoined here.
            spec.params_joined()
        }
    }

    fn parse(s: &str, fmt: &str) -> Option<i64> {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp());
        }
        // Date-only formats parse as a date at midnight.
        NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp())
    }
}

impl Cast for DatetimeCast {
    fn cast_in(&self, raw: &Value, spec: &CastSpec) -> CastResult<Value> {
        match raw {
            Value::String(s) => Self::parse(s, &Self::fmt(spec))
                .map(Value::from)
                .ok_or_else(|| unparsable("datetime", raw)),
            // Integer input is taken as an epoch already.
            Value::Number(n) if n.as_i64().is_some() => Ok(raw.clone()),
            _ => Err(unparsable("datetime", raw)),
        }
    }

    fn cast_out(&self, typed: &Value, spec: &CastSpec) -> CastResult<Value> {
        match typed {
            Value::Number(n) => {
                let secs = n.as_i64().ok_or_else(|| unparsable("datetime", typed))?;
                let dt = DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| unparsable("datetime", typed))?;
                // Validate the format eagerly; formatting through Display
                // panics on a bad specifier.
                let fmt = Self::fmt(spec);
                let items: Vec<Item<'_>> = StrftimeItems::new(&fmt).collect();
                if items.iter().any(|i| matches!(i, Item::Error)) {
                    return Err(CastError::InvalidParam {
                        kind: "datetime".into(),
                        reason: format!("bad format {fmt:?}"),
                    });
                }
                Ok(Value::String(
                    dt.naive_utc().format_with_items(items.into_iter()).to_string(),
                ))
            }
            // Already formatted (e.g. round-tripped through a canonical map).
            Value::String(_) => Ok(typed.clone()),
            _ => Err(unparsable("datetime", typed)),
        }
    }
}

struct DecimalCast;

impl DecimalCast {
    fn digits(spec: &CastSpec) -> CastResult<usize> {
        spec.first_param()
            .and_then(|p| p.parse::<usize>().ok())
            .ok_or_else(|| CastError::InvalidParam {
                kind: "decimal".into(),
                reason: "digit count param required".into(),
            })
    }
}

impl Cast for DecimalCast {
    fn cast_in(&self, raw: &Value, spec: &CastSpec) -> CastResult<Value> {
        Self::digits(spec)?;
        match raw {
            Value::String(s) => {
                if split_decimal(s).is_none() {
                    return Err(unparsable("decimal", raw));
                }
                Ok(Value::String(s.trim().to_string()))
            }
            Value::Number(n) => {
                // Rejects numbers whose text form is exponent notation.
                let s = n.to_string();
                if split_decimal(&s).is_none() {
                    return Err(unparsable("decimal", raw));
                }
                Ok(Value::String(s))
            }
            _ => Err(unparsable("decimal", raw)),
        }
    }

    fn cast_out(&self, typed: &Value, spec: &CastSpec) -> CastResult<Value> {
        let digits = Self::digits(spec)?;
        let s = match typed {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(unparsable("decimal", typed)),
        };
        Ok(Value::String(format_decimal(&s, digits)?))
    }
}

struct BooleanCast;

impl Cast for BooleanCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(Value::Bool(truthy(raw)))
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(json!(if truthy(typed) { 1 } else { 0 }))
    }
}

struct IntegerCast;

fn coerce_i64(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::Bool(b) => i64::from(*b),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

impl Cast for IntegerCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(Value::from(coerce_i64(raw)))
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(typed.clone())
    }
}

struct FloatCast;

fn coerce_f64(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

impl Cast for FloatCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        let f = coerce_f64(raw);
        Ok(Number::from_f64(f).map_or(Value::from(0.0), Value::Number))
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(typed.clone())
    }
}

struct StringCast;

impl Cast for StringCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        let s = match raw {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            // Containers stringify as compact JSON.
            other => serde_json::to_string(other).unwrap_or_default(),
        };
        Ok(Value::String(s))
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        Ok(typed.clone())
    }
}

struct ArrayCast;

impl Cast for ArrayCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        match raw {
            Value::Array(_) | Value::Object(_) => Ok(raw.clone()),
            Value::Null => Ok(Value::Array(Vec::new())),
            scalar => Ok(Value::Array(vec![scalar.clone()])),
        }
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        serde_json::to_string(typed)
            .map(Value::String)
            .map_err(|_| unparsable("array", typed))
    }
}

struct JsonCast;

impl Cast for JsonCast {
    fn cast_in(&self, raw: &Value, _spec: &CastSpec) -> CastResult<Value> {
        match raw {
            Value::String(s) => serde_json::from_str(s).map_err(|_| unparsable("json", raw)),
            // Structured input is already parsed.
            other => Ok(other.clone()),
        }
    }

    fn cast_out(&self, typed: &Value, _spec: &CastSpec) -> CastResult<Value> {
        serde_json::to_string(typed)
            .map(Value::String)
            .map_err(|_| unparsable("json", typed))
    }
}
