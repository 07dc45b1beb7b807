//! Member values carried by annotation instances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single member value of an annotation instance.
///
/// Serialized untagged so that declarative models can write plain scalars
/// (`0`, `"^[a-z]+$"`, `true`). Type references and enum values use small
/// maps:
///
/// ```
/// use annotation_schema_core::AnnotationValue;
///
/// let value: AnnotationValue = serde_json::from_str(r#"{"type_ref": "Acme.Color"}"#).unwrap();
/// assert_eq!(value, AnnotationValue::type_ref("Acme.Color"));
///
/// let value: AnnotationValue =
///     serde_json::from_str(r#"{"enum_type": "DataType", "variant": "Date"}"#).unwrap();
/// assert_eq!(value.to_string(), "Date");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum AnnotationValue {
    /// No value; also what a declared but unset member reads as.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Reference to a type by fully-qualified name.
    TypeRef { type_ref: String },
    /// A named enum variant.
    Enum { enum_type: String, variant: String },
}

impl AnnotationValue {
    /// Creates a type reference value.
    pub fn type_ref(name: impl Into<String>) -> Self {
        Self::TypeRef {
            type_ref: name.into(),
        }
    }

    /// Creates an enum variant value.
    pub fn enum_variant(enum_type: impl Into<String>, variant: impl Into<String>) -> Self {
        Self::Enum {
            enum_type: enum_type.into(),
            variant: variant.into(),
        }
    }

    /// Short name of the value's shape, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::TypeRef { .. } => "type reference",
            Self::Enum { .. } => "enum",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way a host runtime's `ToString` would: enum values
/// print their variant, type references their name, null prints nothing.
impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::TypeRef { type_ref } => f.write_str(type_ref),
            Self::Enum { variant, .. } => f.write_str(variant),
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for AnnotationValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
