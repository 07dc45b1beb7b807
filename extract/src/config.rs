//! Recognized annotation kinds and extractor configuration.
//!
//! Every constraint is recognized by the fully-qualified name of an
//! annotation kind. [`RecognizedKinds`] holds those names, defaulting to the
//! data-annotation and component-model kinds, and can be overridden from a
//! YAML or JSON file so that extraction works against look-alike kinds from
//! other libraries.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! include_inherited: true
//! kinds:
//!   range: Acme.Validation.RangeAttribute
//!   pattern: Acme.Validation.PatternAttribute
//! ```
//!
//! Kinds not listed keep their default names.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use annotation_schema_core::names::{self, members, is_qualified_name};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Accessor cache slot, one per constraint that reads member values.
///
/// Presence-only constraints (required, url, phone, email) never read
/// members and have no slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Display,
    DisplayName,
    Description,
    Range,
    StringLength,
    MinLength,
    MaxLength,
    EnumDataType,
    Pattern,
    DataType,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::Display,
        Slot::DisplayName,
        Slot::Description,
        Slot::Range,
        Slot::StringLength,
        Slot::MinLength,
        Slot::MaxLength,
        Slot::EnumDataType,
        Slot::Pattern,
        Slot::DataType,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Display => "display",
            Slot::DisplayName => "display name",
            Slot::Description => "description",
            Slot::Range => "range",
            Slot::StringLength => "string length",
            Slot::MinLength => "min length",
            Slot::MaxLength => "max length",
            Slot::EnumDataType => "enum data type",
            Slot::Pattern => "pattern",
            Slot::DataType => "data type",
        }
    }

    /// Members every kind serving this slot must declare.
    pub fn required_members(self) -> &'static [&'static str] {
        match self {
            Slot::Display => &[members::NAME, members::DESCRIPTION],
            Slot::DisplayName => &[members::DISPLAY_NAME],
            Slot::Description => &[members::DESCRIPTION],
            Slot::Range => &[members::MINIMUM, members::MAXIMUM],
            Slot::StringLength => &[members::MAXIMUM_LENGTH],
            Slot::MinLength | Slot::MaxLength => &[members::LENGTH],
            Slot::EnumDataType => &[members::ENUM_TYPE],
            Slot::Pattern => &[members::PATTERN],
            Slot::DataType => &[members::DATA_TYPE],
        }
    }

    /// Members read when declared, skipped otherwise.
    pub fn optional_members(self) -> &'static [&'static str] {
        match self {
            Slot::StringLength => &[members::MINIMUM_LENGTH],
            _ => &[],
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup contract for one slot: which kind to match and which members to
/// read from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindDescriptor<'a> {
    pub slot: Slot,
    pub kind_name: &'a str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

/// Fully-qualified kind names recognized for each constraint.
///
/// # Examples
///
/// ```
/// use annotation_schema_extract::{RecognizedKinds, Slot};
///
/// let kinds = RecognizedKinds::default();
/// assert_eq!(
///     kinds.descriptor(Slot::Range).kind_name,
///     "System.ComponentModel.DataAnnotations.RangeAttribute"
/// );
/// assert_eq!(kinds.descriptor(Slot::StringLength).optional, ["MinimumLength"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizedKinds {
    pub required: String,
    pub range: String,
    pub string_length: String,
    pub min_length: String,
    pub max_length: String,
    pub enum_data_type: String,
    pub pattern: String,
    pub data_type: String,
    pub url: String,
    pub phone: String,
    pub email_address: String,
    pub display: String,
    pub display_name: String,
    pub description: String,
}

impl Default for RecognizedKinds {
    fn default() -> Self {
        Self {
            required: names::REQUIRED_ATTRIBUTE.to_string(),
            range: names::RANGE_ATTRIBUTE.to_string(),
            string_length: names::STRING_LENGTH_ATTRIBUTE.to_string(),
            min_length: names::MIN_LENGTH_ATTRIBUTE.to_string(),
            max_length: names::MAX_LENGTH_ATTRIBUTE.to_string(),
            enum_data_type: names::ENUM_DATA_TYPE_ATTRIBUTE.to_string(),
            pattern: names::REGULAR_EXPRESSION_ATTRIBUTE.to_string(),
            data_type: names::DATA_TYPE_ATTRIBUTE.to_string(),
            url: names::URL_ATTRIBUTE.to_string(),
            phone: names::PHONE_ATTRIBUTE.to_string(),
            email_address: names::EMAIL_ADDRESS_ATTRIBUTE.to_string(),
            display: names::DISPLAY_ATTRIBUTE.to_string(),
            display_name: names::DISPLAY_NAME_ATTRIBUTE.to_string(),
            description: names::DESCRIPTION_ATTRIBUTE.to_string(),
        }
    }
}

static STANDARD_KINDS: LazyLock<RecognizedKinds> = LazyLock::new(RecognizedKinds::default);

impl RecognizedKinds {
    /// Shared instance holding the default names.
    pub fn standard() -> &'static RecognizedKinds {
        &STANDARD_KINDS
    }

    /// Kind name recognized for `slot`.
    pub fn kind_name(&self, slot: Slot) -> &str {
        match slot {
            Slot::Display => &self.display,
            Slot::DisplayName => &self.display_name,
            Slot::Description => &self.description,
            Slot::Range => &self.range,
            Slot::StringLength => &self.string_length,
            Slot::MinLength => &self.min_length,
            Slot::MaxLength => &self.max_length,
            Slot::EnumDataType => &self.enum_data_type,
            Slot::Pattern => &self.pattern,
            Slot::DataType => &self.data_type,
        }
    }

    /// Full lookup contract for `slot`.
    pub fn descriptor(&self, slot: Slot) -> KindDescriptor<'_> {
        KindDescriptor {
            slot,
            kind_name: self.kind_name(slot),
            required: slot.required_members(),
            optional: slot.optional_members(),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 14] {
        [
            ("required", self.required.as_str()),
            ("range", self.range.as_str()),
            ("string_length", self.string_length.as_str()),
            ("min_length", self.min_length.as_str()),
            ("max_length", self.max_length.as_str()),
            ("enum_data_type", self.enum_data_type.as_str()),
            ("pattern", self.pattern.as_str()),
            ("data_type", self.data_type.as_str()),
            ("url", self.url.as_str()),
            ("phone", self.phone.as_str()),
            ("email_address", self.email_address.as_str()),
            ("display", self.display.as_str()),
            ("display_name", self.display_name.as_str()),
            ("description", self.description.as_str()),
        ]
    }

    /// Checks that every configured name is fully qualified.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidKindName`] for the first malformed name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (target, name) in self.entries() {
            if !is_qualified_name(name) {
                return Err(ConfigError::InvalidKindName {
                    target,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Top-level extractor configuration.
///
/// # Examples
///
/// ```no_run
/// use annotation_schema_extract::ExtractorConfig;
///
/// let config = ExtractorConfig::load("annotation-schema.yml").unwrap();
/// println!("range kind: {}", config.kinds.range);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Ask attribute sources for inherited annotations too.
    pub include_inherited: bool,
    /// Recognized kind names.
    pub kinds: RecognizedKinds,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            include_inherited: true,
            kinds: RecognizedKinds::default(),
        }
    }
}

impl ExtractorConfig {
    /// Loads and validates configuration from a YAML or JSON file.
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read,
    /// [`ConfigError::YamlError`] or [`ConfigError::JsonError`] if parsing
    /// fails, or [`ConfigError::InvalidKindName`] if validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Self = if is_json(path) {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml::from_str(&raw)?
        };
        config.kinds.validate()?;
        Ok(config)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::YamlError`] or
    /// [`ConfigError::InvalidKindName`].
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(raw)?;
        config.kinds.validate()?;
        Ok(config)
    }

    /// Saves the configuration, as JSON for `.json` paths and YAML otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or a
    /// serialization error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let raw = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, raw)?;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
