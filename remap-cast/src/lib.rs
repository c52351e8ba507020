//! Bidirectional value conversion for Remap.
//!
//! This crate provides the two value-transform stages of the construction
//! pipeline:
//! - [`CastRegistry`] — named, parameterized casts converting raw source
//!   values to their typed form on the way in and back to a serializable
//!   form on the way out
//! - [`FilterRegistry`] — ordered pre-cast value filters (trim, lowercase,
//!   ...)
//!
//! Both transforms are pure functions of their input plus parameters. Casts
//! for `datetime`, `decimal`, `enum` and `json` fail on unparsable input;
//! the scalar coercions (`boolean`, `integer`, `float`, `string`) are total.

mod builtin;
mod decimal;
mod error;
mod filter;
mod registry;

pub use decimal::format_decimal;
pub use error::{CastError, CastResult};
pub use filter::{FilterFn, FilterRegistry};
pub use registry::{Cast, CastRegistry, EnumDef, EnumVariant};
