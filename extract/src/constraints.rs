//! Extracted constraint payloads.

use std::fmt;

use serde::Serialize;

/// Inclusive numeric bounds from a range annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericRange {
    pub minimum: f64,
    pub maximum: f64,
}

/// Length bounds from a string-length annotation.
///
/// `minimum` is `0` when the annotation kind has no minimum member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBounds {
    pub minimum: i64,
    pub maximum: i64,
}

/// Format hint derived from format-indicating annotations.
///
/// # Examples
///
/// ```
/// use annotation_schema_extract::Format;
///
/// assert_eq!(Format::from_data_type("DateTime"), Some(Format::DateTime));
/// assert_eq!(Format::DateTime.as_str(), "date-time");
/// assert_eq!(Format::from_data_type("Currency"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Uri,
    Date,
    Time,
    DateTime,
    Email,
    Phone,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Uri => "uri",
            Format::Date => "date",
            Format::Time => "time",
            Format::DateTime => "date-time",
            Format::Email => "email",
            Format::Phone => "phone",
        }
    }

    /// Maps a data-type label to a format; unknown labels have none.
    pub fn from_data_type(label: &str) -> Option<Self> {
        match label {
            "Url" => Some(Format::Uri),
            "Date" => Some(Format::Date),
            "Time" => Some(Format::Time),
            "DateTime" => Some(Format::DateTime),
            "EmailAddress" => Some(Format::Email),
            "PhoneNumber" => Some(Format::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and description read from a display annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayText {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Every constraint extracted for one type or member.
///
/// Serializes with absent constraints omitted, ready for a schema generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MemberConstraints {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<NumericRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_length: Option<LengthBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
