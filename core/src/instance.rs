//! Annotation instances attached to types and members.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{KindError, Result};
use crate::{AnnotationValue, Kind};

/// A runtime annotation: a [`Kind`] plus the values of its members.
///
/// Instances are read-only once built. Only members declared on the kind (or
/// one of its bases) may carry values; a declared member without a value
/// reads as [`AnnotationValue::Null`].
///
/// # Examples
///
/// ```
/// use annotation_schema_core::{AnnotationInstance, AnnotationValue, Kind};
///
/// let range = Kind::root("Acme.RangeAttribute", ["Minimum", "Maximum"]);
/// let instance = AnnotationInstance::new(&range, [("Minimum", 0), ("Maximum", 120)]).unwrap();
///
/// assert_eq!(instance.get("Maximum"), AnnotationValue::Int(120));
/// assert!(AnnotationInstance::new(&range, [("Step", 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationInstance {
    kind: Arc<Kind>,
    values: BTreeMap<String, AnnotationValue>,
}

impl AnnotationInstance {
    /// Creates an instance, rejecting values for members the kind does not
    /// declare.
    ///
    /// # Errors
    ///
    /// Returns [`KindError::UndeclaredMember`] for the first value whose
    /// member is not declared on `kind` or its bases.
    pub fn new<I, K, V>(kind: &Arc<Kind>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AnnotationValue>,
    {
        let mut collected = BTreeMap::new();
        for (member, value) in values {
            let member = member.into();
            if !kind.declares(&member) {
                return Err(KindError::UndeclaredMember {
                    kind: kind.name().to_string(),
                    member,
                });
            }
            collected.insert(member, value.into());
        }

        Ok(Self {
            kind: Arc::clone(kind),
            values: collected,
        })
    }

    /// Creates an instance with no member values, as used by presence-only
    /// annotations.
    pub fn marker(kind: &Arc<Kind>) -> Self {
        Self {
            kind: Arc::clone(kind),
            values: BTreeMap::new(),
        }
    }

    /// The instance's most-derived kind.
    pub fn kind(&self) -> &Arc<Kind> {
        &self.kind
    }

    /// Returns the raw value stored for `member`, if one was set.
    pub fn value(&self, member: &str) -> Option<&AnnotationValue> {
        self.values.get(member)
    }

    /// Reads `member`, treating an unset member as null.
    pub fn get(&self, member: &str) -> AnnotationValue {
        self.values.get(member).cloned().unwrap_or_default()
    }

    /// Iterates the explicitly set member values in name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
