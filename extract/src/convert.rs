//! Typed conversion of raw member values.
//!
//! Conversions are strict: a value of the wrong shape is a
//! [`ExtractError::ConversionError`], never a silent default.

use annotation_schema_core::AnnotationValue;

use crate::error::{ExtractError, Result};

/// Identifies the member a value was read from, for error reporting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Origin<'a> {
    pub kind: &'a str,
    pub member: &'a str,
}

impl Origin<'_> {
    fn error(&self, expected: &'static str, value: &AnnotationValue) -> ExtractError {
        ExtractError::ConversionError {
            kind: self.kind.to_string(),
            member: self.member.to_string(),
            expected,
            found: describe(value),
        }
    }
}

fn describe(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Null => "null".to_string(),
        other => format!("{} {:?}", other.type_name(), other.to_string()),
    }
}

/// Converts a numeric or numeric-string value to `f64`.
///
/// Strings are parsed culture-invariantly: `.` is the decimal separator and
/// `,` is accepted as a group separator and ignored.
pub(crate) fn to_f64(value: &AnnotationValue, origin: Origin<'_>) -> Result<f64> {
    match value {
        AnnotationValue::Int(i) => Ok(*i as f64),
        AnnotationValue::Float(x) => Ok(*x),
        AnnotationValue::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            cleaned
                .parse::<f64>()
                .map_err(|_| origin.error("a number", value))
        }
        other => Err(origin.error("a number", other)),
    }
}

/// Converts an integer value to `i64`.
pub(crate) fn to_i64(value: &AnnotationValue, origin: Origin<'_>) -> Result<i64> {
    match value {
        AnnotationValue::Int(i) => Ok(*i),
        other => Err(origin.error("an integer", other)),
    }
}

/// Converts an integer value, reading null as `default`.
///
/// Declared members that were never set carry null; integer members of the
/// standard kinds default rather than fail in that case.
pub(crate) fn to_i64_or(value: &AnnotationValue, default: i64, origin: Origin<'_>) -> Result<i64> {
    match value {
        AnnotationValue::Null => Ok(default),
        other => to_i64(other, origin),
    }
}

/// Converts a string value; null reads as absent.
pub(crate) fn to_opt_string(value: AnnotationValue, origin: Origin<'_>) -> Result<Option<String>> {
    match value {
        AnnotationValue::Null => Ok(None),
        AnnotationValue::String(s) => Ok(Some(s)),
        other => Err(origin.error("a string", &other)),
    }
}

/// Converts a type reference value; null reads as absent.
pub(crate) fn to_type_ref(value: AnnotationValue, origin: Origin<'_>) -> Result<Option<String>> {
    match value {
        AnnotationValue::Null => Ok(None),
        AnnotationValue::TypeRef { type_ref } => Ok(Some(type_ref)),
        other => Err(origin.error("a type reference", &other)),
    }
}

/// Renders an enum-like value as its variant label.
///
/// Enum values yield their variant and strings are taken verbatim.
pub(crate) fn to_label(value: &AnnotationValue, origin: Origin<'_>) -> Result<String> {
    match value {
        AnnotationValue::Enum { variant, .. } => Ok(variant.clone()),
        AnnotationValue::String(s) => Ok(s.clone()),
        other => Err(origin.error("an enum value", other)),
    }
}
