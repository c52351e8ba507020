use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The declared type of a record field.
///
/// Declared types describe the shape an instance field is expected to hold.
/// They are independent of casts: a field may be declared `Text` and carry a
/// `datetime` cast that stores it as an epoch number internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredType {
    Text,
    Integer,
    Float,
    Boolean,
    Map,
    List,
    /// No shape constraint; the field holds whatever the source provides.
    Any,
}

/// One field of a [`RecordSchema`](crate::RecordSchema).
///
/// Fields are required by default. Optional fields without a default
/// materialize as JSON `null` when the source has no value for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub declared_type: DeclaredType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl FieldDef {
    /// Creates a required field of the given declared type.
    #[must_use]
    pub fn new(name: &str, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            default: None,
            required: true,
        }
    }

    /// Shorthand for a text field.
    #[must_use]
    pub fn text(name: &str) -> Self {
        Self::new(name, DeclaredType::Text)
    }

    /// Shorthand for an integer field.
    #[must_use]
    pub fn integer(name: &str) -> Self {
        Self::new(name, DeclaredType::Integer)
    }

    /// Shorthand for a float field.
    #[must_use]
    pub fn float(name: &str) -> Self {
        Self::new(name, DeclaredType::Float)
    }

    /// Shorthand for a boolean field.
    #[must_use]
    pub fn boolean(name: &str) -> Self {
        Self::new(name, DeclaredType::Boolean)
    }

    /// Shorthand for a nested-map field.
    #[must_use]
    pub fn map(name: &str) -> Self {
        Self::new(name, DeclaredType::Map)
    }

    /// Shorthand for a list field.
    #[must_use]
    pub fn list(name: &str) -> Self {
        Self::new(name, DeclaredType::List)
    }

    /// Shorthand for an unconstrained field.
    #[must_use]
    pub fn any(name: &str) -> Self {
        Self::new(name, DeclaredType::Any)
    }

    /// Marks the field optional: a missing source value becomes `null`
    /// instead of failing construction.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Attaches a default used when the source has no value for the field.
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }
}
