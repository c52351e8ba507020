//! Validation-rule evaluation.
//!
//! The rule DSL itself is a collaborator: the engine only requires that a
//! declared rule exists and passes. [`BasicRules`] covers the common cases;
//! callers with their own DSL supply a [`RuleEvaluator`].

use regex_lite::Regex;
use remap_schema::RuleSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One failed rule. Violations are accumulated across every rule of every
/// field before a construction call reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub rule: String,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.reason, self.rule)
    }
}

/// Evaluates one rule against one post-cast field value.
pub trait RuleEvaluator: Send + Sync {
    /// Returns `Err(reason)` when the rule fails.
    fn evaluate(&self, value: &Value, rule: &RuleSpec) -> Result<(), String>;
}

/// Built-in rule set: `gte:n`, `lte:n`, `min_len:n`, `max_len:n`,
/// `one_of:a:b:...`, `matches:regex`.
#[derive(Debug, Default)]
pub struct BasicRules;

impl BasicRules {
    fn numeric(value: &Value) -> Result<f64, String> {
        match value {
            Value::Number(n) => n.as_f64().ok_or_else(|| "not a finite number".into()),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{s:?} is not numeric")),
            other => Err(format!("{other} is not numeric")),
        }
    }

    fn length(value: &Value) -> Result<usize, String> {
        match value {
            Value::String(s) => Ok(s.chars().count()),
            Value::Array(a) => Ok(a.len()),
            other => Err(format!("{other} has no length")),
        }
    }

    fn bound(rule: &RuleSpec) -> Result<f64, String> {
        rule.params
            .first()
            .and_then(|p| p.parse::<f64>().ok())
            .ok_or_else(|| format!("rule {} needs a numeric bound", rule.name))
    }
}

impl RuleEvaluator for BasicRules {
    fn evaluate(&self, value: &Value, rule: &RuleSpec) -> Result<(), String> {
        match rule.name.as_str() {
            "gte" => {
                let bound = Self::bound(rule)?;
                let n = Self::numeric(value)?;
                if n >= bound {
                    Ok(())
                } else {
                    Err(format!("{n} is below {bound}"))
                }
            }
            "lte" => {
                let bound = Self::bound(rule)?;
                let n = Self::numeric(value)?;
                if n <= bound {
                    Ok(())
                } else {
                    Err(format!("{n} is above {bound}"))
                }
            }
            "min_len" => {
                let bound = Self::bound(rule)? as usize;
                let len = Self::length(value)?;
                if len >= bound {
                    Ok(())
                } else {
                    Err(format!("length {len} is below {bound}"))
                }
            }
            "max_len" => {
                let bound = Self::bound(rule)? as usize;
                let len = Self::length(value)?;
                if len <= bound {
                    Ok(())
                } else {
                    Err(format!("length {len} is above {bound}"))
                }
            }
            "one_of" => {
                let matched = rule.params.iter().any(|p| match value {
                    Value::String(s) => s == p,
                    other => other.to_string() == *p,
                });
                if matched {
                    Ok(())
                } else {
                    Err(format!("{value} is not one of {:?}", rule.params))
                }
            }
            "matches" => {
                let pattern = rule.params_joined();
                let re = Regex::new(&pattern).map_err(|e| format!("bad pattern: {e}"))?;
                match value {
                    Value::String(s) if re.is_match(s) => Ok(()),
                    Value::String(s) => Err(format!("{s:?} does not match {pattern:?}")),
                    other => Err(format!("{other} is not a string")),
                }
            }
            unknown => Err(format!("unknown rule: {unknown}")),
        }
    }
}
