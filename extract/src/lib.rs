//! Validation and documentation constraint extraction from annotations.
//!
//! Given a type and an optional member, this crate finds annotation
//! instances of recognized kinds through an
//! [`AttributeSource`](annotation_schema_core::AttributeSource) and turns
//! them into typed constraint values for a schema generator.
//!
//! # Main entry points
//!
//! - [`ConstraintExtractor`]: one method per constraint (required, range,
//!   string length, min/max length, enum data type, pattern, format, display
//!   name, description) plus [`ConstraintExtractor::member_constraints`] to
//!   collect them all.
//! - [`matcher::find_matching`]: kind matching with ancestor walking, so
//!   kinds derived from a recognized kind are found too.
//! - [`AccessorRegistry`]: append-only cache of per-kind member readers,
//!   shared process-wide through [`AccessorRegistry::global`] or scoped to a
//!   caller.
//! - [`ExtractorConfig`] / [`RecognizedKinds`]: which fully-qualified kind
//!   names are recognized, loadable from YAML or JSON.
//!
//! # Errors
//!
//! A missing annotation is an absent result, never an error. A matched kind
//! that lacks a required member yields [`ExtractError::ShapeMismatch`], and a
//! member value of the wrong shape yields [`ExtractError::ConversionError`].

mod config;
mod constraints;
mod convert;
mod error;
mod extractor;
pub mod matcher;
mod registry;

pub use config::{ExtractorConfig, KindDescriptor, RecognizedKinds, Slot};
pub use constraints::{DisplayText, Format, LengthBounds, MemberConstraints, NumericRange};
pub use error::{ConfigError, ExtractError, Result};
pub use extractor::ConstraintExtractor;
pub use matcher::MatchResult;
pub use registry::{AccessorBundle, AccessorRegistry};
