//! Field validation shared by the request types.
//!
//! Rules are declared with `validator` derives on the request structs; this
//! module turns the derive output into an ordered list of field violations
//! that callers can report verbatim.

use std::borrow::Cow;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::constants::PHONE_PATTERN;
use crate::error::{DomainError, DomainResult};

/// Compiled phone number pattern.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));

/// A single rule violation on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Rejects empty and whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Flatten `validator` output into violations sorted by field name.
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .errors()
        .iter()
        .filter_map(|(field, kind)| match kind {
            ValidationErrorsKind::Field(errs) => Some((field, errs)),
            _ => None,
        })
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let detail = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(e));
                FieldViolation::new(field.to_string(), format!("{} {}", field, detail))
            })
        })
        .collect();

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

/// Message for rules declared without one; range bounds come from the rule.
fn default_message(error: &ValidationError) -> String {
    match (error.code.as_ref(), error.params.get("min"), error.params.get("max")) {
        ("range", Some(min), Some(max)) => format!("must be between {} and {}", min, max),
        _ => "is invalid".to_string(),
    }
}

/// Run the derived rules of `value` and return every violation.
pub fn violations_of<T: Validate>(value: &T) -> Vec<FieldViolation> {
    match value.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => collect_violations(&errors),
    }
}

/// Run the derived rules of `value`, failing with all violations at once.
pub fn ensure_valid<T: Validate>(value: &T) -> DomainResult<()> {
    let violations = violations_of(value);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_pattern() {
        for ok in ["010-1234-5678", "02-123-4567", "031-123-4567"] {
            assert!(PHONE_REGEX.is_match(ok), "{ok} should match");
        }
        for bad in ["0101-1234-5678", "010-12-5678", "01012345678", "010-1234-567", "a10-1234-5678"] {
            assert!(!PHONE_REGEX.is_match(bad), "{bad} should not match");
        }
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("alice").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }
}
