//! Record schema model for Remap.
//!
//! Defines the declarative types every other Remap crate consumes:
//! - [`FieldDef`] — one named, typed field of a record
//! - [`RecordSchema`] — the fixed, ordered field list plus pipeline hooks
//! - [`SchemaBuilder`] — registration API; hooks are declared explicitly,
//!   never discovered by runtime introspection
//! - [`CastSpec`] — a parsed `"kind:param:..."` cast descriptor
//! - [`Capabilities`] — bitset of declared hooks, computed once at build
//!
//! A schema is immutable once built. The construction engine decides between
//! its fast and slow paths purely from [`Capabilities`], so everything that
//! customizes the pipeline has to be declared here.

mod capabilities;
mod cast_spec;
mod error;
mod field;
mod schema;

pub use capabilities::Capabilities;
pub use cast_spec::CastSpec;
pub use error::{SchemaError, SchemaResult};
pub use field::{DeclaredType, FieldDef};
pub use schema::{
    ComputedField, ComputedFn, ComputedKind, FilterSpec, RecordSchema, RuleSpec, SchemaBuilder,
    parse_template,
};
