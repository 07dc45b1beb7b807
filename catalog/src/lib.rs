//! Declarative type models for annotation-based constraint extraction.
//!
//! A [`TypeModel`] describes types, their members, and the annotations
//! attached to both, and implements
//! [`AttributeSource`](annotation_schema_core::AttributeSource) so that it can
//! feed a constraint extractor directly. Models are written as
//! [`ModelDocument`]s in JSON or YAML.
//!
//! # Quick start
//!
//! ```
//! use annotation_schema_catalog::TypeModel;
//! use annotation_schema_core::{AttributeSource, Target};
//!
//! let model = TypeModel::from_yaml_str(r#"
//! types:
//!   - name: Person
//!     members:
//!       - name: age
//!         annotations:
//!           - kind: System.ComponentModel.DataAnnotations.RangeAttribute
//!             values: { Minimum: 0, Maximum: 120 }
//! "#).unwrap();
//!
//! let age = model.attributes(Target::Member { owner: "Person", member: "age" }, true);
//! assert_eq!(age[0].get("Maximum").to_string(), "120");
//! ```
//!
//! The standard data-annotation kinds are available unless a document sets
//! `standard_kinds: false`; further kinds can be declared under `kinds:`,
//! including kinds that derive from the standard ones.

mod document;
mod error;
mod loader;
mod model;

pub use document::{AnnotationDeclaration, MemberDeclaration, ModelDocument, TypeDeclaration};
pub use error::{CatalogError, Result};
pub use model::TypeModel;
