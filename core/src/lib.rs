//! Core annotation model for schema constraint extraction.
//!
//! This crate defines the vocabulary shared by the extractor and by concrete
//! attribute sources:
//!
//! - [`Kind`]: a named annotation kind with an optional base and declared
//!   members.
//! - [`AnnotationInstance`]: a kind plus member values, attached to a type
//!   or member.
//! - [`AnnotationValue`]: a single member value.
//! - [`AttributeSource`]: the seam through which extraction asks for the
//!   instances attached to a [`Target`].
//! - [`KindTable`]: name-indexed kinds resolved from [`KindDeclaration`]s,
//!   with the standard data-annotation hierarchy available through
//!   [`KindTable::standard`].
//!
//! # Example
//!
//! ```
//! use annotation_schema_core::*;
//!
//! let table = KindTable::standard();
//! let range = table.get(names::RANGE_ATTRIBUTE).unwrap();
//! let instance = AnnotationInstance::new(range, [("Minimum", 0), ("Maximum", 120)]).unwrap();
//!
//! assert!(instance.kind().derives_from(names::VALIDATION_ATTRIBUTE));
//! assert_eq!(instance.get("Minimum"), AnnotationValue::Int(0));
//! ```

mod error;
mod instance;
mod kind;
pub mod names;
mod source;
mod table;
mod value;

pub use error::{KindError, Result};
pub use instance::AnnotationInstance;
pub use kind::{Ancestors, Kind};
pub use source::{AttributeSource, Target};
pub use table::{KindDeclaration, KindTable};
pub use value::AnnotationValue;
