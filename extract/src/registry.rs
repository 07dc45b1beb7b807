//! Accessor bundles and the registry that caches them.
//!
//! Reading members out of a matched annotation goes through an
//! [`AccessorBundle`]: one reader per member, validated once against the
//! matching kind. Bundles are built lazily by [`AccessorRegistry`] on first
//! use of a `(slot, matching kind)` pair and reused for every later instance
//! of that kind or its descendants. The registry is append-only; bundles are
//! never evicted.
//!
//! # Examples
//!
//! ```
//! use annotation_schema_core::{AnnotationInstance, AnnotationValue, Kind};
//! use annotation_schema_extract::{AccessorRegistry, RecognizedKinds, Slot};
//!
//! let registry = AccessorRegistry::new();
//! let kinds = RecognizedKinds::default();
//! let range = Kind::root(kinds.range.clone(), ["Minimum", "Maximum"]);
//! let instance = AnnotationInstance::new(&range, [("Minimum", 1), ("Maximum", 9)]).unwrap();
//!
//! let bundle = registry.bundle(kinds.descriptor(Slot::Range), &range).unwrap();
//! assert_eq!(bundle.read(&instance, "Maximum").unwrap(), AnnotationValue::Int(9));
//!
//! // Second lookup reuses the cached bundle.
//! registry.bundle(kinds.descriptor(Slot::Range), &range).unwrap();
//! assert_eq!(registry.constructions(), 1);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use annotation_schema_core::{AnnotationInstance, AnnotationValue, Kind};
use tracing::{debug, warn};

use crate::config::{KindDescriptor, Slot};
use crate::error::{ExtractError, Result};

type Reader = Box<dyn Fn(&AnnotationInstance) -> AnnotationValue + Send + Sync>;

/// Named readers built against one matching kind.
///
/// Immutable after construction. Readers accept any instance whose kind is
/// the bundle's kind or one of its descendants.
pub struct AccessorBundle {
    slot: Slot,
    kind: Arc<Kind>,
    readers: BTreeMap<&'static str, Reader>,
}

impl AccessorBundle {
    /// Builds readers for `required` and `optional` members of `kind`.
    ///
    /// Optional members that `kind` does not declare get no reader.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ShapeMismatch`] if a required member is not
    /// declared on `kind` or its bases.
    pub fn build(
        slot: Slot,
        kind: &Arc<Kind>,
        required: &[&'static str],
        optional: &[&'static str],
    ) -> Result<Self> {
        let mut readers: BTreeMap<&'static str, Reader> = BTreeMap::new();

        for &member in required {
            if !kind.declares(member) {
                warn!(
                    slot = %slot,
                    kind = kind.name(),
                    member,
                    "Matched annotation kind lacks required member"
                );
                return Err(ExtractError::ShapeMismatch {
                    slot,
                    kind: kind.name().to_string(),
                    member: member.to_string(),
                });
            }
            readers.insert(member, reader(member));
        }

        for &member in optional {
            if kind.declares(member) {
                readers.insert(member, reader(member));
            }
        }

        Ok(Self {
            slot,
            kind: Arc::clone(kind),
            readers,
        })
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// The matching kind the bundle was built against.
    pub fn kind(&self) -> &Arc<Kind> {
        &self.kind
    }

    /// Returns `true` if the bundle has a reader for `member`.
    pub fn has_member(&self, member: &str) -> bool {
        self.readers.contains_key(member)
    }

    /// Members with readers, in name order.
    pub fn members(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.readers.keys().copied()
    }

    /// Reads `member` from `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ShapeMismatch`] if the bundle has no reader
    /// for `member`, or if `instance` is not of the bundle's kind.
    pub fn read(&self, instance: &AnnotationInstance, member: &str) -> Result<AnnotationValue> {
        let Some(reader) = self.readers.get(member) else {
            return Err(self.mismatch(self.kind.name(), member));
        };
        if !instance.kind().derives_from(self.kind.name()) {
            return Err(self.mismatch(instance.kind().name(), member));
        }
        Ok(reader(instance))
    }

    /// Reads `member` if the bundle has a reader for it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ShapeMismatch`] if `instance` is not of the
    /// bundle's kind.
    pub fn read_optional(
        &self,
        instance: &AnnotationInstance,
        member: &str,
    ) -> Result<Option<AnnotationValue>> {
        if self.has_member(member) {
            self.read(instance, member).map(Some)
        } else {
            Ok(None)
        }
    }

    fn mismatch(&self, kind: &str, member: &str) -> ExtractError {
        ExtractError::ShapeMismatch {
            slot: self.slot,
            kind: kind.to_string(),
            member: member.to_string(),
        }
    }
}

fn reader(member: &'static str) -> Reader {
    Box::new(move |instance: &AnnotationInstance| instance.get(member))
}

impl fmt::Debug for AccessorBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorBundle")
            .field("slot", &self.slot)
            .field("kind", &self.kind.name())
            .field("members", &self.readers.keys().collect::<Vec<_>>())
            .finish()
    }
}

static GLOBAL: LazyLock<AccessorRegistry> = LazyLock::new(AccessorRegistry::new);

/// Append-only cache of [`AccessorBundle`]s keyed by `(slot, matching kind)`.
///
/// Kinds are compared structurally: a cached bundle is reused only for a
/// kind with the same name, members and base chain as the one it was built
/// against. Two models declaring the same kind name with different members
/// therefore get separate bundles, even through the global registry.
///
/// Safe to share across threads. Construction of a missing bundle happens
/// under the write lock after a second lookup, so concurrent first use
/// publishes exactly one bundle per key and readers never see a partial one.
/// Failed constructions are not cached.
#[derive(Debug, Default)]
pub struct AccessorRegistry {
    bundles: RwLock<HashMap<Slot, HashMap<String, Vec<Arc<AccessorBundle>>>>>,
    constructions: AtomicUsize,
}

fn find_built<'a>(
    built: Option<&'a Vec<Arc<AccessorBundle>>>,
    kind: &Arc<Kind>,
) -> Option<&'a Arc<AccessorBundle>> {
    built?
        .iter()
        .find(|bundle| Arc::ptr_eq(&bundle.kind, kind) || *bundle.kind == **kind)
}

impl AccessorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static AccessorRegistry {
        &GLOBAL
    }

    /// Returns the bundle for `descriptor.slot` and `matching_kind`, building
    /// it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ShapeMismatch`] if `matching_kind` does not
    /// declare a member the descriptor requires.
    pub fn bundle(
        &self,
        descriptor: KindDescriptor<'_>,
        matching_kind: &Arc<Kind>,
    ) -> Result<Arc<AccessorBundle>> {
        let slot = descriptor.slot;
        if let Some(bundle) = self.cached(slot, matching_kind) {
            return Ok(bundle);
        }

        let mut bundles = self.bundles.write().unwrap_or_else(PoisonError::into_inner);
        let built = bundles
            .entry(slot)
            .or_default()
            .entry(matching_kind.name().to_string())
            .or_default();
        if let Some(bundle) = find_built(Some(&*built), matching_kind) {
            return Ok(Arc::clone(bundle));
        }

        let bundle = Arc::new(AccessorBundle::build(
            slot,
            matching_kind,
            descriptor.required,
            descriptor.optional,
        )?);
        self.constructions.fetch_add(1, Ordering::Relaxed);
        debug!(
            slot = %slot,
            kind = matching_kind.name(),
            variants = built.len() + 1,
            members = ?bundle.members().collect::<Vec<_>>(),
            "Built accessor bundle"
        );

        built.push(Arc::clone(&bundle));
        Ok(bundle)
    }

    /// Returns the cached bundle for `slot` built against `kind`, if any.
    pub fn cached(&self, slot: Slot, kind: &Arc<Kind>) -> Option<Arc<AccessorBundle>> {
        let bundles = self.bundles.read().unwrap_or_else(PoisonError::into_inner);
        let built = bundles.get(&slot).and_then(|per_slot| per_slot.get(kind.name()));
        find_built(built, kind).map(Arc::clone)
    }

    /// Returns the first bundle cached for `slot` and a kind named
    /// `kind_name`, if any was built.
    pub fn lookup(&self, slot: Slot, kind_name: &str) -> Option<Arc<AccessorBundle>> {
        let bundles = self.bundles.read().unwrap_or_else(PoisonError::into_inner);
        bundles
            .get(&slot)
            .and_then(|per_slot| per_slot.get(kind_name))
            .and_then(|built| built.first())
            .map(Arc::clone)
    }

    /// Number of cached bundles.
    pub fn len(&self) -> usize {
        let bundles = self.bundles.read().unwrap_or_else(PoisonError::into_inner);
        bundles
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bundles ever constructed by this registry.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::Relaxed)
    }
}
