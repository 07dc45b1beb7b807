//! Kind matching over candidate annotation lists.
//!
//! An annotation matches a target name when its kind, or any ancestor of its
//! kind, carries exactly that fully-qualified name. This lets user-defined
//! kinds that merely derive from a recognized kind be picked up without the
//! extractor knowing about them.

use std::sync::Arc;

use annotation_schema_core::{AnnotationInstance, Kind};

/// A matched annotation together with the ancestor kind that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// The matched instance.
    pub instance: Arc<AnnotationInstance>,
    /// The kind in the instance's chain whose name equals the target.
    ///
    /// Accessor bundles are keyed and built against this kind, not the
    /// instance's most-derived kind.
    pub matching_kind: Arc<Kind>,
}

/// Finds the first candidate whose kind chain contains `target`.
///
/// Candidates are scanned in order and each chain is walked from the
/// concrete kind towards the root; the first hit wins. Name comparison is
/// exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use annotation_schema_core::{AnnotationInstance, Kind};
/// use annotation_schema_extract::matcher::find_matching;
///
/// let description = Kind::root("Lib.DescriptionAttribute", ["Description"]);
/// let localized = Kind::derived("Acme.LocalizedDescriptionAttribute", &description, ["Key"]);
/// let candidates = vec![Arc::new(AnnotationInstance::marker(&localized))];
///
/// let found = find_matching(&candidates, "Lib.DescriptionAttribute").unwrap();
/// assert_eq!(found.matching_kind.name(), "Lib.DescriptionAttribute");
/// assert_eq!(found.instance.kind().name(), "Acme.LocalizedDescriptionAttribute");
/// ```
pub fn find_matching(candidates: &[Arc<AnnotationInstance>], target: &str) -> Option<MatchResult> {
    candidates.iter().find_map(|instance| {
        matching_ancestor(instance.kind(), target).map(|kind| MatchResult {
            instance: Arc::clone(instance),
            matching_kind: Arc::clone(kind),
        })
    })
}

/// Returns the kind in `kind`'s chain named `target`, if any.
pub fn matching_ancestor<'a>(kind: &'a Arc<Kind>, target: &str) -> Option<&'a Arc<Kind>> {
    kind.ancestors().find(|ancestor| ancestor.name() == target)
}
