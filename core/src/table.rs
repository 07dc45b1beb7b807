//! Name-indexed tables of annotation kinds.
//!
//! [`KindTable`] resolves [`KindDeclaration`]s, which may appear in any order
//! and reference bases declared later in the same batch, into shared
//! [`Kind`]s. [`KindTable::standard`] pre-populates the data-annotation and
//! component-model kinds with their usual hierarchy.
//!
//! # Examples
//!
//! ```
//! use annotation_schema_core::{KindDeclaration, KindTable, names};
//!
//! let mut table = KindTable::standard();
//! table
//!     .declare_all([KindDeclaration::derived(
//!         "Acme.PercentAttribute",
//!         names::RANGE_ATTRIBUTE,
//!         Vec::<String>::new(),
//!     )])
//!     .unwrap();
//!
//! let percent = table.get("Acme.PercentAttribute").unwrap();
//! assert!(percent.derives_from(names::RANGE_ATTRIBUTE));
//! assert!(percent.declares("Minimum"));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{KindError, Result};
use crate::names::{self, members};
use crate::Kind;

/// Declarative description of a kind, as written in model files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindDeclaration {
    /// Fully-qualified kind name.
    pub name: String,
    /// Fully-qualified name of the base kind, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Members declared directly on this kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl KindDeclaration {
    /// Declares a kind with no base.
    pub fn root<I, S>(name: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            base: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Declares a kind deriving from `base`.
    pub fn derived<I, S>(name: &str, base: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            base: Some(base.to_string()),
            members: members.into_iter().map(Into::into).collect(),
        }
    }
}

/// Kinds indexed by fully-qualified name.
#[derive(Debug, Clone, Default)]
pub struct KindTable {
    kinds: HashMap<String, Arc<Kind>>,
}

impl KindTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the standard data-annotation kinds.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table
            .declare_all(standard_declarations())
            .expect("standard kind declarations must resolve");
        table
    }

    /// Looks up a kind by exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<Kind>> {
        self.kinds.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kinds.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Resolves and inserts a batch of declarations.
    ///
    /// Bases may refer to kinds already in the table or to other
    /// declarations in the batch, in any order. The table is left unchanged
    /// if any declaration fails.
    ///
    /// # Errors
    ///
    /// - [`KindError::InvalidName`] for a malformed kind or base name.
    /// - [`KindError::DuplicateKind`] if a name is already present or
    ///   declared twice.
    /// - [`KindError::UnknownBase`] if a base cannot be found.
    /// - [`KindError::InheritanceCycle`] if bases form a loop.
    pub fn declare_all(
        &mut self,
        declarations: impl IntoIterator<Item = KindDeclaration>,
    ) -> Result<()> {
        let mut pending: HashMap<String, KindDeclaration> = HashMap::new();
        let mut order = Vec::new();

        for decl in declarations {
            if !names::is_qualified_name(&decl.name) {
                return Err(KindError::InvalidName(decl.name));
            }
            if let Some(base) = decl.base.as_deref().filter(|b| !names::is_qualified_name(b)) {
                return Err(KindError::InvalidName(base.to_string()));
            }
            if self.kinds.contains_key(&decl.name) || pending.contains_key(&decl.name) {
                return Err(KindError::DuplicateKind(decl.name));
            }
            order.push(decl.name.clone());
            pending.insert(decl.name.clone(), decl);
        }

        let mut resolved: HashMap<String, Arc<Kind>> = HashMap::new();
        for name in &order {
            let mut visiting = HashSet::new();
            self.resolve(name, &pending, &mut resolved, &mut visiting)?;
        }

        self.kinds.extend(resolved);
        Ok(())
    }

    fn resolve(
        &self,
        name: &str,
        pending: &HashMap<String, KindDeclaration>,
        resolved: &mut HashMap<String, Arc<Kind>>,
        visiting: &mut HashSet<String>,
    ) -> Result<Arc<Kind>> {
        if let Some(kind) = self.kinds.get(name).or_else(|| resolved.get(name)) {
            return Ok(Arc::clone(kind));
        }
        if !visiting.insert(name.to_string()) {
            return Err(KindError::InheritanceCycle(name.to_string()));
        }

        // Callers only pass names present in `pending` or in the table.
        let Some(decl) = pending.get(name) else {
            return Err(KindError::UnknownBase {
                kind: name.to_string(),
                base: name.to_string(),
            });
        };

        let kind = match &decl.base {
            None => Kind::root(decl.name.clone(), decl.members.iter().cloned()),
            Some(base_name) => {
                if !self.kinds.contains_key(base_name) && !pending.contains_key(base_name) {
                    return Err(KindError::UnknownBase {
                        kind: decl.name.clone(),
                        base: base_name.clone(),
                    });
                }
                let base = self.resolve(base_name, pending, resolved, visiting)?;
                Kind::derived(decl.name.clone(), &base, decl.members.iter().cloned())
            }
        };

        resolved.insert(decl.name.clone(), Arc::clone(&kind));
        Ok(kind)
    }
}

fn standard_declarations() -> Vec<KindDeclaration> {
    use members::*;

    vec![
        KindDeclaration::root(names::VALIDATION_ATTRIBUTE, [ERROR_MESSAGE]),
        KindDeclaration::derived(
            names::REQUIRED_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [ALLOW_EMPTY_STRINGS],
        ),
        KindDeclaration::derived(
            names::RANGE_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [MINIMUM, MAXIMUM, OPERAND_TYPE],
        ),
        KindDeclaration::derived(
            names::STRING_LENGTH_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [MAXIMUM_LENGTH, MINIMUM_LENGTH],
        ),
        KindDeclaration::derived(
            names::MIN_LENGTH_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [LENGTH],
        ),
        KindDeclaration::derived(
            names::MAX_LENGTH_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [LENGTH],
        ),
        KindDeclaration::derived(
            names::REGULAR_EXPRESSION_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [PATTERN],
        ),
        KindDeclaration::derived(
            names::DATA_TYPE_ATTRIBUTE,
            names::VALIDATION_ATTRIBUTE,
            [DATA_TYPE, CUSTOM_DATA_TYPE],
        ),
        KindDeclaration::derived(
            names::ENUM_DATA_TYPE_ATTRIBUTE,
            names::DATA_TYPE_ATTRIBUTE,
            [ENUM_TYPE],
        ),
        KindDeclaration::derived(
            names::URL_ATTRIBUTE,
            names::DATA_TYPE_ATTRIBUTE,
            Vec::<String>::new(),
        ),
        KindDeclaration::derived(
            names::PHONE_ATTRIBUTE,
            names::DATA_TYPE_ATTRIBUTE,
            Vec::<String>::new(),
        ),
        KindDeclaration::derived(
            names::EMAIL_ADDRESS_ATTRIBUTE,
            names::DATA_TYPE_ATTRIBUTE,
            Vec::<String>::new(),
        ),
        KindDeclaration::root(
            names::DISPLAY_ATTRIBUTE,
            [NAME, SHORT_NAME, DESCRIPTION, GROUP_NAME, PROMPT, ORDER],
        ),
        KindDeclaration::root(names::DISPLAY_NAME_ATTRIBUTE, [DISPLAY_NAME]),
        KindDeclaration::root(names::DESCRIPTION_ATTRIBUTE, [DESCRIPTION]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_links_data_type_family() {
        let table = KindTable::standard();
        let email = table.get(names::EMAIL_ADDRESS_ATTRIBUTE).unwrap();
        assert!(email.derives_from(names::DATA_TYPE_ATTRIBUTE));
        assert!(email.declares(members::DATA_TYPE));

        let enum_kind = table.get(names::ENUM_DATA_TYPE_ATTRIBUTE).unwrap();
        assert!(enum_kind.declares(members::ENUM_TYPE));
        assert!(enum_kind.declares(members::ERROR_MESSAGE));
    }

    #[test]
    fn test_declarations_resolve_out_of_order() {
        let mut table = KindTable::new();
        table
            .declare_all([
                KindDeclaration::derived("Acme.Child", "Acme.Parent", ["B"]),
                KindDeclaration::root("Acme.Parent", ["A"]),
            ])
            .unwrap();

        let child = table.get("Acme.Child").unwrap();
        assert_eq!(child.base().unwrap().name(), "Acme.Parent");
        assert!(child.declares("A"));
    }

    #[test]
    fn test_unknown_base_is_rejected_and_table_unchanged() {
        let mut table = KindTable::new();
        let err = table
            .declare_all([
                KindDeclaration::root("Acme.Fine", Vec::<String>::new()),
                KindDeclaration::derived("Acme.Orphan", "Acme.Missing", Vec::<String>::new()),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            KindError::UnknownBase {
                kind: "Acme.Orphan".into(),
                base: "Acme.Missing".into(),
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_cycle_is_detected() {
        let mut table = KindTable::new();
        let err = table
            .declare_all([
                KindDeclaration::derived("Acme.A", "Acme.B", Vec::<String>::new()),
                KindDeclaration::derived("Acme.B", "Acme.A", Vec::<String>::new()),
            ])
            .unwrap_err();
        assert!(matches!(err, KindError::InheritanceCycle(_)));
    }

    #[test]
    fn test_duplicate_and_invalid_names() {
        let mut table = KindTable::standard();
        let err = table
            .declare_all([KindDeclaration::root(
                names::RANGE_ATTRIBUTE,
                Vec::<String>::new(),
            )])
            .unwrap_err();
        assert_eq!(err, KindError::DuplicateKind(names::RANGE_ATTRIBUTE.into()));

        let err = table
            .declare_all([KindDeclaration::root("not a name", Vec::<String>::new())])
            .unwrap_err();
        assert_eq!(err, KindError::InvalidName("not a name".into()));
    }
}
