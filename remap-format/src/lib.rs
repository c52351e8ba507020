//! Wire-format encoders for Remap.
//!
//! Every encoder consumes a canonical map (the outbound-cast representation
//! an engine produces from an instance) and is a pure function of it:
//! - [`to_json`] — `serde_json`, optionally pretty-printed
//! - [`to_xml`] — nested elements under a configurable root, entity-escaped
//! - [`to_csv`] — one header row, one data row, declaration order
//! - [`to_yaml`] — behind the `yaml` cargo feature; without it the call
//!   fails with [`FormatError::MissingCodec`] rather than silently degrading

mod csv_enc;
mod error;
mod json;
mod xml;
mod yaml;

pub use csv_enc::to_csv;
pub use error::{FormatError, FormatResult};
pub use json::{JsonOptions, to_json};
pub use xml::{XmlOptions, to_xml};
pub use yaml::to_yaml;
