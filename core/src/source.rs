//! The attribute source seam.
//!
//! Extraction never discovers annotations itself; it asks an
//! [`AttributeSource`] for the instances attached to a type or member.

use std::fmt;
use std::sync::Arc;

use crate::AnnotationInstance;

/// What annotations are requested for: a type, or a named member of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target<'a> {
    Type(&'a str),
    Member { owner: &'a str, member: &'a str },
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Type(owner) => f.write_str(owner),
            Target::Member { owner, member } => write!(f, "{owner}.{member}"),
        }
    }
}

/// Supplies the annotation instances attached to a type or member.
///
/// Implementations must be side-effect free and return the same ordered list
/// for the same arguments; callers may ask repeatedly. Order defines
/// precedence: earlier instances win when several match. Unknown targets
/// yield an empty list.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use annotation_schema_core::{AnnotationInstance, AttributeSource, Kind, Target};
///
/// struct Single(Arc<AnnotationInstance>);
///
/// impl AttributeSource for Single {
///     fn attributes(&self, target: Target<'_>, _inherit: bool) -> Vec<Arc<AnnotationInstance>> {
///         match target {
///             Target::Member { member: "age", .. } => vec![Arc::clone(&self.0)],
///             _ => Vec::new(),
///         }
///     }
/// }
///
/// let required = Kind::root("Acme.RequiredAttribute", Vec::<String>::new());
/// let source = Single(Arc::new(AnnotationInstance::marker(&required)));
/// assert_eq!(source.attributes(Target::Member { owner: "Person", member: "age" }, true).len(), 1);
/// assert!(source.attributes(Target::Type("Person"), true).is_empty());
/// ```
pub trait AttributeSource {
    /// Returns the instances attached to `target`, including those inherited
    /// from base types when `inherit` is set.
    fn attributes(&self, target: Target<'_>, inherit: bool) -> Vec<Arc<AnnotationInstance>>;
}

impl<T: AttributeSource + ?Sized> AttributeSource for &T {
    fn attributes(&self, target: Target<'_>, inherit: bool) -> Vec<Arc<AnnotationInstance>> {
        (**self).attributes(target, inherit)
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for Arc<T> {
    fn attributes(&self, target: Target<'_>, inherit: bool) -> Vec<Arc<AnnotationInstance>> {
        (**self).attributes(target, inherit)
    }
}
