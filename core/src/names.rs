//! Well-known annotation kind names and qualified-name validation.
//!
//! The constants name the data-annotation and component-model kinds that the
//! extractors recognize by default. Member name constants describe the shape
//! each kind is expected to expose.

use std::sync::LazyLock;

use regex::Regex;

pub const VALIDATION_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.ValidationAttribute";
pub const REQUIRED_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.RequiredAttribute";
pub const RANGE_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.RangeAttribute";
pub const STRING_LENGTH_ATTRIBUTE: &str =
    "System.ComponentModel.DataAnnotations.StringLengthAttribute";
pub const MIN_LENGTH_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.MinLengthAttribute";
pub const MAX_LENGTH_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.MaxLengthAttribute";
pub const REGULAR_EXPRESSION_ATTRIBUTE: &str =
    "System.ComponentModel.DataAnnotations.RegularExpressionAttribute";
pub const DATA_TYPE_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.DataTypeAttribute";
pub const ENUM_DATA_TYPE_ATTRIBUTE: &str =
    "System.ComponentModel.DataAnnotations.EnumDataTypeAttribute";
pub const URL_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.UrlAttribute";
pub const PHONE_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.PhoneAttribute";
pub const EMAIL_ADDRESS_ATTRIBUTE: &str =
    "System.ComponentModel.DataAnnotations.EmailAddressAttribute";
pub const DISPLAY_ATTRIBUTE: &str = "System.ComponentModel.DataAnnotations.DisplayAttribute";
pub const DISPLAY_NAME_ATTRIBUTE: &str = "System.ComponentModel.DisplayNameAttribute";
pub const DESCRIPTION_ATTRIBUTE: &str = "System.ComponentModel.DescriptionAttribute";

/// Member names read from recognized kinds.
pub mod members {
    pub const ERROR_MESSAGE: &str = "ErrorMessage";
    pub const ALLOW_EMPTY_STRINGS: &str = "AllowEmptyStrings";
    pub const MINIMUM: &str = "Minimum";
    pub const MAXIMUM: &str = "Maximum";
    pub const OPERAND_TYPE: &str = "OperandType";
    pub const MINIMUM_LENGTH: &str = "MinimumLength";
    pub const MAXIMUM_LENGTH: &str = "MaximumLength";
    pub const LENGTH: &str = "Length";
    pub const PATTERN: &str = "Pattern";
    pub const DATA_TYPE: &str = "DataType";
    pub const CUSTOM_DATA_TYPE: &str = "CustomDataType";
    pub const ENUM_TYPE: &str = "EnumType";
    pub const NAME: &str = "Name";
    pub const SHORT_NAME: &str = "ShortName";
    pub const DESCRIPTION: &str = "Description";
    pub const GROUP_NAME: &str = "GroupName";
    pub const PROMPT: &str = "Prompt";
    pub const ORDER: &str = "Order";
    pub const DISPLAY_NAME: &str = "DisplayName";
}

static QUALIFIED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:[.+][A-Za-z_][A-Za-z0-9_]*)*(?:`[0-9]+)?$")
        .expect("static regex must compile")
});

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex must compile"));

/// Returns `true` if `name` is a dotted, fully-qualified identifier.
///
/// Nested type separators (`+`) and a trailing generic arity (`` `1 ``) are
/// accepted.
///
/// # Examples
///
/// ```
/// use annotation_schema_core::names::is_qualified_name;
///
/// assert!(is_qualified_name("System.ComponentModel.DescriptionAttribute"));
/// assert!(is_qualified_name("Acme.Outer+InnerAttribute"));
/// assert!(is_qualified_name("Acme.Wrapper`1"));
/// assert!(!is_qualified_name("Acme..Broken"));
/// assert!(!is_qualified_name(""));
/// ```
pub fn is_qualified_name(name: &str) -> bool {
    QUALIFIED_NAME_RE.is_match(name)
}

/// Returns `true` if `name` is a single undotted identifier, as member
/// names must be.
///
/// ```
/// use annotation_schema_core::names::is_identifier;
///
/// assert!(is_identifier("MaximumLength"));
/// assert!(is_identifier("_id"));
/// assert!(!is_identifier("a.b"));
/// assert!(!is_identifier("2fa"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}
