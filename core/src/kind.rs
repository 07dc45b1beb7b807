//! Annotation kinds and their ancestor chains.
//!
//! A [`Kind`] is the declared classification of an annotation instance. It is
//! identified by a fully-qualified name, may derive from a single base kind,
//! and declares a set of named members. Members declared on a base kind are
//! visible on every descendant.
//!
//! # Examples
//!
//! ```
//! use annotation_schema_core::Kind;
//!
//! let range = Kind::root("Acme.RangeAttribute", ["Minimum", "Maximum"]);
//! let percent = Kind::derived("Acme.PercentAttribute", &range, ["Precision"]);
//!
//! assert!(percent.derives_from("Acme.RangeAttribute"));
//! assert!(percent.declares("Minimum"));
//! assert!(!range.declares("Precision"));
//!
//! let chain: Vec<&str> = percent.ancestors().map(|k| k.name()).collect();
//! assert_eq!(chain, ["Acme.PercentAttribute", "Acme.RangeAttribute"]);
//! ```

use std::fmt;
use std::sync::Arc;

/// Declared classification of an annotation instance.
///
/// Kinds are immutable once built and shared behind [`Arc`]. The universal
/// root every kind ultimately derives from is implicit: a kind without a base
/// is the root-most *named* kind of its chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kind {
    name: String,
    base: Option<Arc<Kind>>,
    members: Vec<String>,
}

impl Kind {
    /// Creates a kind with no base.
    pub fn root<I, S>(name: impl Into<String>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            base: None,
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates a kind deriving from `base`.
    ///
    /// `members` lists only the members declared by the new kind; inherited
    /// members are resolved through the base chain.
    pub fn derived<I, S>(name: impl Into<String>, base: &Arc<Kind>, members: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            name: name.into(),
            base: Some(Arc::clone(base)),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    /// Fully-qualified name of the kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct base kind, if any.
    pub fn base(&self) -> Option<&Arc<Kind>> {
        self.base.as_ref()
    }

    /// Members declared directly on this kind, excluding inherited ones.
    pub fn declared_members(&self) -> &[String] {
        &self.members
    }

    /// Iterates the kind itself followed by each base, root-most last.
    pub fn ancestors(self: &Arc<Self>) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns `true` if `member` is declared on this kind or any base.
    pub fn declares(&self, member: &str) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind.members.iter().any(|m| m == member) {
                return true;
            }
            current = kind.base.as_deref();
        }
        false
    }

    /// Returns `true` if this kind, or one of its bases, is named `name`.
    ///
    /// Comparison is exact and case-sensitive.
    pub fn derives_from(&self, name: &str) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind.name == name {
                return true;
            }
            current = kind.base.as_deref();
        }
        false
    }

    /// Number of kinds in the chain, including this one.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = Some(self);
        while let Some(kind) = current {
            depth += 1;
            current = kind.base.as_deref();
        }
        depth
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a kind's ancestor chain, returned by [`Kind::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Arc<Kind>>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Arc<Kind>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_ref();
        Some(current)
    }
}
