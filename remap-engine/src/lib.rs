//! Construction engine for Remap.
//!
//! Orchestrates the mapping pipeline that turns loosely-structured input
//! into immutable typed records:
//!
//! - [`path`] — dot-notation resolution against nested maps
//! - [`Source`] — normalization of maps, JSON text, XML text, instances and
//!   foreign objects into one canonical nested map
//! - [`Engine`] — schema registration (with init-once caching), fast-path
//!   analysis, construction, and canonical-map production
//! - [`Instance`] — the immutable materialized record
//! - [`RuleEvaluator`] — validation-rule collaborator, with a small built-in
//!   rule set
//!
//! # Fast and slow paths
//!
//! A schema with no declared hooks (casts, template, rules, filters,
//! computed) is constructed by direct field-by-field extraction. Declaring
//! any hook — even one that would not change behavior — switches the type to
//! the generalized pipeline. The decision is structural, made once per type
//! and memoized.
//!
//! # Example
//!
//! ```
//! use remap_engine::{Engine, Source};
//! use remap_schema::{FieldDef, RecordSchema};
//! use serde_json::json;
//!
//! let engine = Engine::new();
//! let schema = RecordSchema::builder("user")
//!     .field(FieldDef::text("name"))
//!     .field(FieldDef::integer("age"))
//!     .build()
//!     .unwrap();
//! engine.register_schema(schema).unwrap();
//!
//! let user = engine
//!     .construct("user", json!({"name": "Ada", "age": 36}).into())
//!     .unwrap();
//! assert_eq!(user.get("name"), Some(&json!("Ada")));
//! ```

mod engine;
mod error;
mod instance;
pub mod path;
mod pipeline;
mod registry;
mod rules;
mod source;

pub use engine::{ConstructOptions, Engine};
pub use error::{EngineError, EngineResult, SourceError};
pub use instance::Instance;
pub use path::{Resolved, resolve};
pub use registry::SchemaRegistry;
pub use rules::{BasicRules, RuleEvaluator, Violation};
pub use source::{Canonicalize, Source};
