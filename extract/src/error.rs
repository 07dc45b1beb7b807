//! Error types for constraint extraction and extractor configuration.

use thiserror::Error;

use crate::config::Slot;

/// Errors raised while reading a matched annotation.
///
/// Absence of a matching annotation is never an error; these variants signal
/// that a match was found but could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// The matched kind does not declare a member the slot requires, or an
    /// accessor was used on an instance outside the kind it was built for.
    #[error("annotation kind `{kind}` cannot serve {slot}: member `{member}` is not declared")]
    ShapeMismatch {
        slot: Slot,
        kind: String,
        member: String,
    },

    /// A member value could not be converted to the expected semantic type.
    #[error("cannot convert `{kind}.{member}` to {expected}: found {found}")]
    ConversionError {
        kind: String,
        member: String,
        expected: &'static str,
        found: String,
    },
}

/// Errors raised while loading or validating an [`ExtractorConfig`](crate::ExtractorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A configured kind name is not a fully-qualified name.
    #[error("invalid kind name for {target}: {name:?}")]
    InvalidKindName { target: &'static str, name: String },
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
