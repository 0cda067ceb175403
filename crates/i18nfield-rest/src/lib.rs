//! # i18nfield-rest
//!
//! The REST/API type adapter for i18nfield-rs. An API layer exchanging JSON
//! with clients uses [`I18nField`] to accept either a bare string or a
//! locale-keyed object as input, rejecting unknown locale keys and
//! non-string values before a [`LazyI18nString`] is ever constructed, and to
//! render values back as their plain data.

use std::collections::BTreeMap;

use i18nfield_core::{locale, I18nData, I18nError, I18nResult, LazyI18nString, ValidationError};

/// A serializer field for internationalized strings.
///
/// Input contract: a bare JSON string (legacy form) or an object whose keys
/// are configured locale codes and whose values are strings. Output
/// contract: the plain data — a string for legacy values, an object for
/// multi-locale values, `null` for absent ones.
///
/// # Examples
///
/// ```
/// use i18nfield_rest::I18nField;
///
/// let field = I18nField::new().langcodes(&["de", "en"]);
/// let value = field
///     .to_internal_value(&serde_json::json!({"de": "Hallo"}))
///     .unwrap();
/// assert_eq!(field.to_representation(&value), serde_json::json!({"de": "Hallo"}));
/// ```
#[derive(Debug, Clone)]
pub struct I18nField {
    langcodes: Vec<String>,
}

impl Default for I18nField {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nField {
    /// Creates an adapter validating against every configured language.
    pub fn new() -> Self {
        Self {
            langcodes: locale::language_codes(),
        }
    }

    /// Replaces the locale codes accepted as object keys.
    #[must_use]
    pub fn langcodes(mut self, codes: &[&str]) -> Self {
        self.langcodes = codes.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Converts inbound JSON into a `LazyI18nString`.
    ///
    /// Rejects objects containing keys outside the configured locale set or
    /// values that are not strings, and any JSON type other than a string or
    /// an object.
    pub fn to_internal_value(&self, data: &serde_json::Value) -> I18nResult<LazyI18nString> {
        match data {
            serde_json::Value::String(s) => Ok(LazyI18nString::from(s.as_str())),
            serde_json::Value::Object(object) => {
                let mut map = BTreeMap::new();
                for (key, value) in object {
                    if !self.langcodes.contains(key) {
                        return Err(I18nError::InvalidLocale(format!(
                            "Invalid languages included: {key}"
                        )));
                    }
                    match value {
                        serde_json::Value::String(s) => {
                            map.insert(key.clone(), s.clone());
                        }
                        _ => {
                            return Err(I18nError::InvalidLocale(format!(
                                "All entries must be strings: {key}"
                            )))
                        }
                    }
                }
                Ok(LazyI18nString::from(map))
            }
            _ => Err(I18nError::Validation(ValidationError::new(
                "Invalid data type.",
                "invalid",
            ))),
        }
    }

    /// Renders a `LazyI18nString` as its plain JSON data.
    pub fn to_representation(&self, value: &LazyI18nString) -> serde_json::Value {
        match value.data() {
            I18nData::Empty => serde_json::Value::Null,
            I18nData::Legacy(s) => serde_json::Value::String(s.clone()),
            I18nData::Localized(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            ),
        }
    }
}
