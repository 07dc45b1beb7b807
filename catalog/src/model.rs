//! Resolved type models.
//!
//! A [`TypeModel`] is built from one or more [`ModelDocument`]s. Building
//! resolves kind declarations, instantiates every annotation against its
//! kind, and checks type inheritance. The result is an immutable
//! [`AttributeSource`].
//!
//! Inherited lookups walk base types nearest first: a type's own annotations
//! come before its base's, and a member's annotations on the owner come
//! before those on a same-named member of a base type.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use annotation_schema_core::names::{is_identifier, is_qualified_name};
use annotation_schema_core::{AnnotationInstance, AttributeSource, KindTable, Target};

use crate::document::{AnnotationDeclaration, ModelDocument, TypeDeclaration};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone)]
struct MemberEntry {
    name: String,
    annotations: Vec<Arc<AnnotationInstance>>,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    base: Option<String>,
    annotations: Vec<Arc<AnnotationInstance>>,
    members: Vec<MemberEntry>,
}

impl TypeEntry {
    fn member(&self, name: &str) -> Option<&MemberEntry> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Immutable set of annotated types.
///
/// # Examples
///
/// ```
/// use annotation_schema_catalog::TypeModel;
/// use annotation_schema_core::{AttributeSource, Target};
///
/// let model = TypeModel::from_yaml_str(r#"
/// types:
///   - name: Person
///     members:
///       - name: email
///         annotations:
///           - kind: System.ComponentModel.DataAnnotations.EmailAddressAttribute
/// "#).unwrap();
///
/// let found = model.attributes(Target::Member { owner: "Person", member: "email" }, true);
/// assert_eq!(found.len(), 1);
/// assert_eq!(model.member_names("Person"), ["email"]);
/// ```
#[derive(Debug, Clone)]
pub struct TypeModel {
    kinds: KindTable,
    types: HashMap<String, TypeEntry>,
    order: Vec<String>,
}

impl TypeModel {
    /// Builds a model from a single document.
    ///
    /// # Errors
    ///
    /// See [`TypeModel::from_documents`].
    pub fn from_document(document: ModelDocument) -> Result<Self> {
        Self::from_documents([document])
    }

    /// Builds a model from several documents.
    ///
    /// Kinds and types may reference declarations from any document. The
    /// standard kinds are included if any document asks for them.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Kind`] if kind declarations do not resolve or an
    ///   annotation sets an undeclared member.
    /// - [`CatalogError::UnknownKind`] for an annotation of an undeclared kind.
    /// - [`CatalogError::InvalidName`], [`CatalogError::DuplicateType`],
    ///   [`CatalogError::DuplicateMember`] for malformed declarations.
    /// - [`CatalogError::UnknownBaseType`] or [`CatalogError::TypeCycle`] for
    ///   broken type inheritance.
    pub fn from_documents(documents: impl IntoIterator<Item = ModelDocument>) -> Result<Self> {
        let documents: Vec<ModelDocument> = documents.into_iter().collect();

        let mut kinds = if documents.iter().any(|d| d.standard_kinds) {
            KindTable::standard()
        } else {
            KindTable::new()
        };
        kinds.declare_all(documents.iter().flat_map(|d| d.kinds.iter().cloned()))?;

        let mut model = Self {
            kinds,
            types: HashMap::new(),
            order: Vec::new(),
        };
        for decl in documents.iter().flat_map(|d| d.types.iter()) {
            model.insert_type(decl)?;
        }
        model.check_inheritance()?;

        Ok(model)
    }

    fn insert_type(&mut self, decl: &TypeDeclaration) -> Result<()> {
        if !is_qualified_name(&decl.name) {
            return Err(CatalogError::InvalidName(decl.name.clone()));
        }
        if self.types.contains_key(&decl.name) {
            return Err(CatalogError::DuplicateType(decl.name.clone()));
        }

        let annotations = self.instantiate(&decl.annotations, &decl.name)?;

        let mut members: Vec<MemberEntry> = Vec::with_capacity(decl.members.len());
        for member in &decl.members {
            if !is_identifier(&member.name) {
                return Err(CatalogError::InvalidName(member.name.clone()));
            }
            if members.iter().any(|m| m.name == member.name) {
                return Err(CatalogError::DuplicateMember {
                    owner: decl.name.clone(),
                    member: member.name.clone(),
                });
            }
            let site = format!("{}.{}", decl.name, member.name);
            members.push(MemberEntry {
                name: member.name.clone(),
                annotations: self.instantiate(&member.annotations, &site)?,
            });
        }

        self.types.insert(
            decl.name.clone(),
            TypeEntry {
                base: decl.base.clone(),
                annotations,
                members,
            },
        );
        self.order.push(decl.name.clone());
        Ok(())
    }

    fn instantiate(
        &self,
        declarations: &[AnnotationDeclaration],
        site: &str,
    ) -> Result<Vec<Arc<AnnotationInstance>>> {
        declarations
            .iter()
            .map(|decl| -> Result<Arc<AnnotationInstance>> {
                let kind = self.kinds.get(&decl.kind).ok_or_else(|| CatalogError::UnknownKind {
                    kind: decl.kind.clone(),
                    site: site.to_string(),
                })?;
                let values = decl.values.iter().map(|(k, v)| (k.clone(), v.clone()));
                Ok(Arc::new(AnnotationInstance::new(kind, values)?))
            })
            .collect()
    }

    fn check_inheritance(&self) -> Result<()> {
        for name in &self.order {
            let mut seen: HashSet<&str> = HashSet::new();
            let mut current = name.as_str();
            seen.insert(current);
            while let Some(base) = self.types.get(current).and_then(|t| t.base.as_deref()) {
                if !self.types.contains_key(base) {
                    return Err(CatalogError::UnknownBaseType {
                        name: current.to_string(),
                        base: base.to_string(),
                    });
                }
                if !seen.insert(base) {
                    return Err(CatalogError::TypeCycle(name.clone()));
                }
                current = base;
            }
        }
        Ok(())
    }

    /// Kinds known to the model, including the standard ones if requested.
    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    /// Type names in declaration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Members declared directly on `type_name`, in declaration order.
    /// Unknown types have none.
    pub fn member_names(&self, type_name: &str) -> Vec<&str> {
        self.types
            .get(type_name)
            .map(|t| t.members.iter().map(|m| m.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Base type of `type_name`, if any.
    pub fn base_type(&self, type_name: &str) -> Option<&str> {
        self.types.get(type_name)?.base.as_deref()
    }

    /// The type followed by its bases when `inherit` is set.
    fn chain(&self, name: &str, inherit: bool) -> Vec<&TypeEntry> {
        let mut chain = Vec::new();
        let mut current = self.types.get(name);
        while let Some(entry) = current {
            chain.push(entry);
            if !inherit {
                break;
            }
            current = entry.base.as_deref().and_then(|b| self.types.get(b));
        }
        chain
    }
}

impl AttributeSource for TypeModel {
    fn attributes(&self, target: Target<'_>, inherit: bool) -> Vec<Arc<AnnotationInstance>> {
        match target {
            Target::Type(owner) => self
                .chain(owner, inherit)
                .into_iter()
                .flat_map(|t| t.annotations.iter().cloned())
                .collect(),
            Target::Member { owner, member } => self
                .chain(owner, inherit)
                .into_iter()
                .filter_map(|t| t.member(member))
                .flat_map(|m| m.annotations.iter().cloned())
                .collect(),
        }
    }
}
