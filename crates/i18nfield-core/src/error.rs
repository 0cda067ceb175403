//! Error types for i18nfield-rs.
//!
//! This module provides the [`I18nError`] enum covering validation failures,
//! required-policy violations, invalid locale data at the API boundary, and
//! rejected storage-level lookups.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional per-locale error lists.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-locale error lists collected while validating a
/// multi-locale field).
///
/// # Examples
///
/// ```
/// use i18nfield_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("Ensure this value has at most 5 characters.", "max_length");
///
/// // Per-locale validation errors
/// let mut locale_errors = std::collections::BTreeMap::new();
/// locale_errors.insert(
///     "de".to_string(),
///     vec!["Ensure this value has at most 5 characters.".to_string()],
/// );
/// let err = ValidationError::with_locale_errors(locale_errors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "max_length").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-locale validation errors, keyed by locale code.
    pub locale_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            locale_errors: BTreeMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-locale errors.
    pub fn with_locale_errors(locale_errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            locale_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Returns every distinct error message, across all locales, in locale order.
    pub fn messages(&self) -> Vec<String> {
        if !self.message.is_empty() {
            return vec![self.message.clone()];
        }
        let mut seen = Vec::new();
        for errors in self.locale_errors.values() {
            for error in errors {
                if !seen.contains(error) {
                    seen.push(error.clone());
                }
            }
        }
        seen
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.locale_errors.is_empty() {
            let mut first = true;
            for (locale, errors) in &self.locale_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{locale}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for i18nfield-rs.
///
/// All variants are local, synchronous failures surfaced to the immediate
/// caller; none are retried and none are fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// One or more per-locale values failed content validation.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// A required policy was not satisfied (`one_required` / `all_required`).
    ///
    /// `empty_locales` lists which enabled locale slots were empty.
    #[error("This field is required.")]
    Required {
        /// The enabled locales whose slots were empty.
        empty_locales: Vec<String>,
    },

    /// The API boundary received a locale key outside the configured set,
    /// or a non-string value for a locale key.
    #[error("Invalid locale data: {0}")]
    InvalidLocale(String),

    /// Storage-level querying by locale-string content is not supported.
    #[error("Lookups on i18n strings are not supported: {0}")]
    UnsupportedLookup(String),
}

/// A convenience type alias for `Result<T, I18nError>`.
pub type I18nResult<T> = Result<T, I18nError>;
