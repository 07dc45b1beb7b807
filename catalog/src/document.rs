//! Serializable model documents.
//!
//! A document declares annotation kinds and the types, members and
//! annotations that use them. Documents are plain data; resolution and
//! validation happen when they are turned into a
//! [`TypeModel`](crate::TypeModel).
//!
//! # Example YAML
//!
//! ```yaml
//! kinds:
//!   - name: Acme.PercentAttribute
//!     base: System.ComponentModel.DataAnnotations.RangeAttribute
//! types:
//!   - name: Person
//!     annotations:
//!       - kind: System.ComponentModel.DataAnnotations.DisplayAttribute
//!         values: { Name: Person }
//!     members:
//!       - name: age
//!         annotations:
//!           - kind: System.ComponentModel.DataAnnotations.RangeAttribute
//!             values: { Minimum: 0, Maximum: 120 }
//! ```

use std::collections::BTreeMap;

use annotation_schema_core::{AnnotationValue, KindDeclaration};
use serde::{Deserialize, Serialize};

/// Top-level model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDocument {
    /// Include the standard data-annotation kinds.
    pub standard_kinds: bool,
    /// Additional kind declarations.
    pub kinds: Vec<KindDeclaration>,
    /// Type declarations.
    pub types: Vec<TypeDeclaration>,
}

impl Default for ModelDocument {
    fn default() -> Self {
        Self {
            standard_kinds: true,
            kinds: Vec::new(),
            types: Vec::new(),
        }
    }
}

/// A type with its own annotations and members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    /// Name of the base type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDeclaration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDeclaration>,
}

/// A named member of a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDeclaration {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDeclaration>,
}

/// One annotation: a kind name plus member values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDeclaration {
    pub kind: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationDeclaration {
    /// Declares a presence-only annotation.
    pub fn marker(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            values: BTreeMap::new(),
        }
    }

    /// Adds a member value.
    pub fn with_value(mut self, member: &str, value: impl Into<AnnotationValue>) -> Self {
        self.values.insert(member.to_string(), value.into());
        self
    }
}
