//! Constraint extraction over an attribute source.
//!
//! [`ConstraintExtractor`] answers one question per constraint for a type
//! and optional member. Every lookup follows the same template:
//!
//! 1. Ask the [`AttributeSource`] for the member's annotations and match
//!    them against the recognized kind name.
//! 2. Only if nothing matched, repeat against the owning type.
//! 3. On a match, read members through the cached [`AccessorBundle`] for
//!    the slot and the matching kind, then convert.
//!
//! Display name and description first exhaust the display annotation
//! (member, then type) and only then try their legacy annotations (member,
//! then type). Format checks url, phone and email indicators in that order
//! before falling back to the data-type annotation.

use std::sync::Arc;

use annotation_schema_core::names::members;
use annotation_schema_core::{AnnotationValue, AttributeSource, Target};
use tracing::debug;

use crate::config::{ExtractorConfig, RecognizedKinds, Slot};
use crate::constraints::{DisplayText, Format, LengthBounds, MemberConstraints, NumericRange};
use crate::convert::{self, Origin};
use crate::error::Result;
use crate::matcher::{MatchResult, find_matching};
use crate::registry::{AccessorBundle, AccessorRegistry};

/// Length a max-length annotation carries when no limit was given.
const UNBOUNDED_LENGTH: i64 = -1;

/// Extracts constraints for types and members of an [`AttributeSource`].
///
/// Borrowing the source, registry and recognized kinds keeps the extractor
/// cheap to create per request; the registry is what carries state between
/// requests.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use annotation_schema_core::{AnnotationInstance, AttributeSource, KindTable, Target, names};
/// use annotation_schema_extract::{AccessorRegistry, ConstraintExtractor, NumericRange};
///
/// struct PersonAge(Vec<Arc<AnnotationInstance>>);
///
/// impl AttributeSource for PersonAge {
///     fn attributes(&self, target: Target<'_>, _inherit: bool) -> Vec<Arc<AnnotationInstance>> {
///         match target {
///             Target::Member { owner: "Person", member: "age" } => self.0.clone(),
///             _ => Vec::new(),
///         }
///     }
/// }
///
/// let table = KindTable::standard();
/// let range = table.get(names::RANGE_ATTRIBUTE).unwrap();
/// let source = PersonAge(vec![Arc::new(
///     AnnotationInstance::new(range, [("Minimum", 0), ("Maximum", 120)]).unwrap(),
/// )]);
///
/// let registry = AccessorRegistry::new();
/// let extractor = ConstraintExtractor::new(&source).with_registry(&registry);
///
/// assert_eq!(
///     extractor.range("Person", Some("age")).unwrap(),
///     Some(NumericRange { minimum: 0.0, maximum: 120.0 })
/// );
/// assert!(!extractor.required("Person", Some("age")));
/// ```
#[derive(Debug)]
pub struct ConstraintExtractor<'a, S: ?Sized> {
    source: &'a S,
    registry: &'a AccessorRegistry,
    kinds: &'a RecognizedKinds,
    include_inherited: bool,
}

impl<S: ?Sized> Clone for ConstraintExtractor<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for ConstraintExtractor<'_, S> {}

impl<'a, S: AttributeSource + ?Sized> ConstraintExtractor<'a, S> {
    /// Creates an extractor using the global registry and default kinds.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            registry: AccessorRegistry::global(),
            kinds: RecognizedKinds::standard(),
            include_inherited: true,
        }
    }

    /// Creates an extractor honoring `config`, caching into `registry`.
    pub fn with_config(
        source: &'a S,
        config: &'a ExtractorConfig,
        registry: &'a AccessorRegistry,
    ) -> Self {
        Self {
            source,
            registry,
            kinds: &config.kinds,
            include_inherited: config.include_inherited,
        }
    }

    /// Uses `registry` instead of the global one.
    pub fn with_registry(mut self, registry: &'a AccessorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Recognizes constraints by the names in `kinds`.
    pub fn with_kinds(mut self, kinds: &'a RecognizedKinds) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn kinds(&self) -> &RecognizedKinds {
        self.kinds
    }

    pub fn registry(&self) -> &AccessorRegistry {
        self.registry
    }

    /// Finds an annotation named `kind_name` on the member, falling back to
    /// the owning type when the member has no match or none is given.
    pub fn find(&self, owner: &str, member: Option<&str>, kind_name: &str) -> Option<MatchResult> {
        if let Some(member) = member {
            let target = Target::Member { owner, member };
            let candidates = self.source.attributes(target, self.include_inherited);
            if let Some(found) = find_matching(&candidates, kind_name) {
                trace_match(target, kind_name, &found);
                return Some(found);
            }
            debug!(
                owner,
                member,
                kind = kind_name,
                "No member-level match, falling back to type"
            );
        }

        let target = Target::Type(owner);
        let candidates = self.source.attributes(target, self.include_inherited);
        let found = find_matching(&candidates, kind_name)?;
        trace_match(target, kind_name, &found);
        Some(found)
    }

    fn locate(
        &self,
        owner: &str,
        member: Option<&str>,
        slot: Slot,
    ) -> Result<Option<(MatchResult, Arc<AccessorBundle>)>> {
        let descriptor = self.kinds.descriptor(slot);
        let Some(found) = self.find(owner, member, descriptor.kind_name) else {
            return Ok(None);
        };
        let bundle = self.registry.bundle(descriptor, &found.matching_kind)?;
        Ok(Some((found, bundle)))
    }

    /// Returns `true` if a required annotation is present.
    pub fn required(&self, owner: &str, member: Option<&str>) -> bool {
        self.find(owner, member, &self.kinds.required).is_some()
    }

    /// Reads the inclusive numeric range.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch for a malformed range kind, or a conversion
    /// error if a bound is not numeric.
    pub fn range(&self, owner: &str, member: Option<&str>) -> Result<Option<NumericRange>> {
        let Some((found, bundle)) = self.locate(owner, member, Slot::Range)? else {
            return Ok(None);
        };

        let minimum = read(&found, &bundle, members::MINIMUM)?;
        let minimum = convert::to_f64(&minimum, origin(&found, members::MINIMUM))?;
        let maximum = read(&found, &bundle, members::MAXIMUM)?;
        let maximum = convert::to_f64(&maximum, origin(&found, members::MAXIMUM))?;

        Ok(Some(NumericRange { minimum, maximum }))
    }

    /// Reads string length bounds; the minimum defaults to `0` when the
    /// matched kind has no minimum member or the annotation leaves it unset.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch or conversion error.
    pub fn string_length(&self, owner: &str, member: Option<&str>) -> Result<Option<LengthBounds>> {
        let Some((found, bundle)) = self.locate(owner, member, Slot::StringLength)? else {
            return Ok(None);
        };

        let maximum = read(&found, &bundle, members::MAXIMUM_LENGTH)?;
        let maximum = convert::to_i64(&maximum, origin(&found, members::MAXIMUM_LENGTH))?;
        let minimum = match bundle.read_optional(&found.instance, members::MINIMUM_LENGTH)? {
            Some(value) => convert::to_i64_or(&value, 0, origin(&found, members::MINIMUM_LENGTH))?,
            None => 0,
        };

        Ok(Some(LengthBounds { minimum, maximum }))
    }

    /// Reads the minimum collection or string length.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch or conversion error.
    pub fn min_length(&self, owner: &str, member: Option<&str>) -> Result<Option<i64>> {
        self.length(owner, member, Slot::MinLength)
    }

    /// Reads the maximum collection or string length.
    ///
    /// An unset length, or the `-1` a parameterless max-length annotation
    /// carries, means no limit and reads as absent.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch or conversion error.
    pub fn max_length(&self, owner: &str, member: Option<&str>) -> Result<Option<i64>> {
        self.length(owner, member, Slot::MaxLength)
    }

    fn length(&self, owner: &str, member: Option<&str>, slot: Slot) -> Result<Option<i64>> {
        let Some((found, bundle)) = self.locate(owner, member, slot)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::LENGTH)?;
        if slot == Slot::MaxLength {
            let length = convert::to_i64_or(&value, UNBOUNDED_LENGTH, origin(&found, members::LENGTH))?;
            return Ok((length != UNBOUNDED_LENGTH).then_some(length));
        }
        convert::to_i64(&value, origin(&found, members::LENGTH)).map(Some)
    }

    /// Reads the enum type values are restricted to.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch, or a conversion error if the member is not
    /// a type reference.
    pub fn enum_data_type(&self, owner: &str, member: Option<&str>) -> Result<Option<String>> {
        let Some((found, bundle)) = self.locate(owner, member, Slot::EnumDataType)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::ENUM_TYPE)?;
        convert::to_type_ref(value, origin(&found, members::ENUM_TYPE))
    }

    /// Reads the regular expression pattern.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch, or a conversion error if the member is not
    /// a string.
    pub fn pattern(&self, owner: &str, member: Option<&str>) -> Result<Option<String>> {
        let Some((found, bundle)) = self.locate(owner, member, Slot::Pattern)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::PATTERN)?;
        convert::to_opt_string(value, origin(&found, members::PATTERN))
    }

    /// Resolves the format hint.
    ///
    /// Url, phone and email indicators are checked in that order and win on
    /// presence alone; otherwise the data-type annotation's value is mapped
    /// through [`Format::from_data_type`]. An unset data type has no format.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch, or a conversion error if the data-type
    /// member is not an enum label.
    pub fn format(&self, owner: &str, member: Option<&str>) -> Result<Option<Format>> {
        let indicators = [
            (self.kinds.url.as_str(), Format::Uri),
            (self.kinds.phone.as_str(), Format::Phone),
            (self.kinds.email_address.as_str(), Format::Email),
        ];
        for (kind_name, format) in indicators {
            if self.find(owner, member, kind_name).is_some() {
                return Ok(Some(format));
            }
        }

        let Some((found, bundle)) = self.locate(owner, member, Slot::DataType)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::DATA_TYPE)?;
        // enum data types match here but usually leave the data type unset
        if value.is_null() {
            return Ok(None);
        }
        let label = convert::to_label(&value, origin(&found, members::DATA_TYPE))?;
        Ok(Format::from_data_type(&label))
    }

    /// Reads name and description from the display annotation.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch, or a conversion error if either member is
    /// not a string.
    pub fn display(&self, owner: &str, member: Option<&str>) -> Result<Option<DisplayText>> {
        let Some((found, bundle)) = self.locate(owner, member, Slot::Display)? else {
            return Ok(None);
        };

        let name = read(&found, &bundle, members::NAME)?;
        let name = convert::to_opt_string(name, origin(&found, members::NAME))?;
        let description = read(&found, &bundle, members::DESCRIPTION)?;
        let description = convert::to_opt_string(description, origin(&found, members::DESCRIPTION))?;

        Ok(Some(DisplayText { name, description }))
    }

    /// Resolves the display name: a non-empty display annotation name, else
    /// the legacy display-name annotation's value.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch or conversion error from either annotation.
    pub fn display_name(&self, owner: &str, member: Option<&str>) -> Result<Option<String>> {
        if let Some(name) = self.display(owner, member)?.and_then(|d| non_empty(d.name)) {
            return Ok(Some(name));
        }

        let Some((found, bundle)) = self.locate(owner, member, Slot::DisplayName)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::DISPLAY_NAME)?;
        convert::to_opt_string(value, origin(&found, members::DISPLAY_NAME))
    }

    /// Resolves the description: a non-empty display annotation description,
    /// else the legacy description annotation's value.
    ///
    /// # Errors
    ///
    /// Returns a shape mismatch or conversion error from either annotation.
    pub fn description(&self, owner: &str, member: Option<&str>) -> Result<Option<String>> {
        if let Some(description) = self
            .display(owner, member)?
            .and_then(|d| non_empty(d.description))
        {
            return Ok(Some(description));
        }

        let Some((found, bundle)) = self.locate(owner, member, Slot::Description)? else {
            return Ok(None);
        };
        let value = read(&found, &bundle, members::DESCRIPTION)?;
        convert::to_opt_string(value, origin(&found, members::DESCRIPTION))
    }

    /// Runs every extractor for the type or member.
    ///
    /// # Errors
    ///
    /// Returns the first shape mismatch or conversion error encountered.
    pub fn member_constraints(&self, owner: &str, member: Option<&str>) -> Result<MemberConstraints> {
        Ok(MemberConstraints {
            required: self.required(owner, member),
            range: self.range(owner, member)?,
            string_length: self.string_length(owner, member)?,
            min_length: self.min_length(owner, member)?,
            max_length: self.max_length(owner, member)?,
            enum_data_type: self.enum_data_type(owner, member)?,
            pattern: self.pattern(owner, member)?,
            format: self.format(owner, member)?,
            display_name: self.display_name(owner, member)?,
            description: self.description(owner, member)?,
        })
    }
}

fn read(found: &MatchResult, bundle: &AccessorBundle, member: &str) -> Result<AnnotationValue> {
    bundle.read(&found.instance, member)
}

fn origin<'a>(found: &'a MatchResult, member: &'a str) -> Origin<'a> {
    Origin {
        kind: found.instance.kind().name(),
        member,
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.is_empty())
}

fn trace_match(target: Target<'_>, kind_name: &str, found: &MatchResult) {
    debug!(
        site = %target,
        kind = kind_name,
        instance_kind = found.instance.kind().name(),
        "Matched annotation"
    );
}
