//! Per-slot and value-level validation for multi-locale fields.
//!
//! Slot validation runs against the raw text of a single enabled locale
//! (length limits). Value-level [`Validator`]s run against the composed
//! [`LazyI18nString`] after all slots cleaned successfully.

use std::fmt;

use i18nfield_core::{I18nData, LazyI18nString, ValidationError};

/// A trait for validating a composed multi-locale value.
///
/// Validators are attached to an
/// [`I18nFormField`](crate::fields::I18nFormField) and run against the
/// composed `LazyI18nString`, not the raw slots.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validates the given value, returning an error if invalid.
    fn validate(&self, value: &LazyI18nString) -> Result<(), ValidationError>;

    /// Returns a human-readable name for this validator.
    fn name(&self) -> &str;
}

/// Validates that no stored variant exceeds a maximum length.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    /// The maximum allowed length, in characters.
    pub max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new `MaxLengthValidator` with the given maximum length.
    pub const fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, value: &LazyI18nString) -> Result<(), ValidationError> {
        for variant in variants(value) {
            if variant.chars().count() > self.max_length {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value has at most {} characters (it has {}).",
                        self.max_length,
                        variant.chars().count()
                    ),
                    "max_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MaxLengthValidator"
    }
}

/// Validates that every non-empty stored variant meets a minimum length.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    /// The minimum required length, in characters.
    pub min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new `MinLengthValidator` with the given minimum length.
    pub const fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, value: &LazyI18nString) -> Result<(), ValidationError> {
        for variant in variants(value) {
            if !variant.is_empty() && variant.chars().count() < self.min_length {
                return Err(ValidationError::new(
                    format!(
                        "Ensure this value has at least {} characters (it has {}).",
                        self.min_length,
                        variant.chars().count()
                    ),
                    "min_length",
                ));
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MinLengthValidator"
    }
}

fn variants(value: &LazyI18nString) -> Vec<&str> {
    match value.data() {
        I18nData::Empty => Vec::new(),
        I18nData::Legacy(s) => vec![s.as_str()],
        I18nData::Localized(map) => map.values().map(String::as_str).collect(),
    }
}

/// Cleans the raw text of a single locale slot.
///
/// Leading and trailing whitespace is stripped; length limits apply to the
/// stripped text. An absent slot cleans to the empty string. Returns every
/// violated constraint, not just the first.
pub fn clean_slot_value(
    raw: Option<&str>,
    min_length: Option<usize>,
    max_length: Option<usize>,
) -> Result<String, Vec<String>> {
    let s = raw.unwrap_or("").trim();
    let mut errors = Vec::new();
    let length = s.chars().count();
    if !s.is_empty() {
        if let Some(min) = min_length {
            if length < min {
                errors.push(format!(
                    "Ensure this value has at least {min} characters (it has {length})."
                ));
            }
        }
        if let Some(max) = max_length {
            if length > max {
                errors.push(format!(
                    "Ensure this value has at most {max} characters (it has {length})."
                ));
            }
        }
    }
    if errors.is_empty() {
        Ok(s.to_string())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn localized(entries: &[(&str, &str)]) -> LazyI18nString {
        let map: BTreeMap<String, String> = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LazyI18nString::from(map)
    }

    #[test]
    fn test_clean_slot_value_strips() {
        assert_eq!(clean_slot_value(Some("  hi  "), None, None), Ok("hi".to_string()));
        assert_eq!(clean_slot_value(None, None, None), Ok(String::new()));
    }

    #[test]
    fn test_clean_slot_value_length_limits() {
        let errors = clean_slot_value(Some("toolong"), None, Some(5)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("at most 5"));

        let errors = clean_slot_value(Some("hi"), Some(3), None).unwrap_err();
        assert!(errors[0].contains("at least 3"));

        // Empty slots are a policy question, not a length question
        assert!(clean_slot_value(Some(""), Some(3), None).is_ok());
    }

    #[test]
    fn test_max_length_validator_checks_every_variant() {
        let v = MaxLengthValidator::new(5);
        assert!(v.validate(&localized(&[("de", "Hallo"), ("en", "Hi")])).is_ok());
        let err = v
            .validate(&localized(&[("de", "Hallo"), ("en", "Hello there")]))
            .unwrap_err();
        assert_eq!(err.code, "max_length");
    }

    #[test]
    fn test_min_length_validator_ignores_empty_variants() {
        let v = MinLengthValidator::new(3);
        assert!(v.validate(&localized(&[("de", "Hallo"), ("en", "")])).is_ok());
        assert!(v.validate(&localized(&[("de", "Hi")])).is_err());
    }

    #[test]
    fn test_validators_on_legacy_value() {
        let v = MaxLengthValidator::new(3);
        assert!(v.validate(&LazyI18nString::from("abc")).is_ok());
        assert!(v.validate(&LazyI18nString::from("abcd")).is_err());
    }
}
