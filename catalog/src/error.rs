//! Error types for catalog loading.
//!
//! Covers I/O, serialization, kind resolution, and structural problems in
//! type declarations.

use std::path::PathBuf;

use annotation_schema_core::KindError;
use thiserror::Error;

/// Errors that can occur while loading a [`TypeModel`](crate::TypeModel).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Kind declarations could not be resolved, or an annotation set a
    /// member its kind does not declare.
    #[error("kind error: {0}")]
    Kind(#[from] KindError),

    /// An annotation references a kind that is not declared.
    #[error("unknown annotation kind `{kind}` on {site}")]
    UnknownKind { kind: String, site: String },

    /// A type or member name is not a well-formed identifier.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Two types share a name.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// Two members of one type share a name.
    #[error("duplicate member `{member}` on type `{owner}`")]
    DuplicateMember { owner: String, member: String },

    /// A type derives from a type that is not declared.
    #[error("type `{name}` derives from unknown type `{base}`")]
    UnknownBaseType { name: String, base: String },

    /// A type's base chain loops back onto itself.
    #[error("type inheritance cycle detected at: {0}")]
    TypeCycle(String),

    /// A model file has an extension other than `json`, `yaml` or `yml`.
    #[error("unsupported model file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Convenience alias for results with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
