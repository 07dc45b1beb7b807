//! Error types for kind and instance construction.

use thiserror::Error;

/// Errors raised while building kinds or annotation instances.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindError {
    /// A value was supplied for a member the kind does not declare.
    #[error("kind `{kind}` does not declare member `{member}`")]
    UndeclaredMember { kind: String, member: String },

    /// A kind names a base that is not known.
    #[error("kind `{kind}` derives from unknown kind `{base}`")]
    UnknownBase { kind: String, base: String },

    /// Two kinds share a fully-qualified name.
    #[error("duplicate kind: {0}")]
    DuplicateKind(String),

    /// A kind's base chain loops back onto itself.
    #[error("kind inheritance cycle detected at: {0}")]
    InheritanceCycle(String),

    /// A name is not a well-formed fully-qualified name.
    #[error("invalid qualified name: {0:?}")]
    InvalidName(String),
}

/// Convenience alias for results with [`KindError`].
pub type Result<T> = std::result::Result<T, KindError>;
