//! Lazy internationalized string values.
//!
//! A [`LazyI18nString`] holds either nothing, a legacy untranslated string,
//! or a mapping from locale code to per-locale variant. Which variant is
//! *displayed* is decided lazily, at resolution time, against a requested
//! locale and a fallback chain.
//!
//! ## Quick start
//!
//! ```
//! use i18nfield_core::LazyI18nString;
//!
//! let s = LazyI18nString::from(r#"{"de": "Hallo", "en": "Hello"}"#);
//! assert_eq!(s.localize("de"), "Hallo");
//! assert_eq!(s.localize_with("de-informal", &["en"]), "Hallo");
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{catalog, locale};

/// The stored shape of a [`LazyI18nString`].
///
/// The shape is fixed at construction time and never mutates, although
/// [`LazyI18nString::map`] may rewrite the string values in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nData {
    /// No value stored.
    Empty,
    /// A legacy value carrying no locale information. Resolves to itself for
    /// every requested locale.
    Legacy(String),
    /// Per-locale variants keyed by locale code (e.g. `"de"`, `"de-informal"`).
    /// Keys need not cover every configured locale.
    Localized(BTreeMap<String, String>),
}

/// A string that carries multiple per-locale variants behind a single value.
///
/// Resolution picks the best available variant for a requested locale:
/// exact match first, then base/informal substitution across the `-`
/// separator, then the fallback chain, then the empty string. Values that
/// are empty strings are skipped at every step.
///
/// `Display` resolves against the thread's active locale
/// (see [`locale::activate`]) and the configured fallback chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LazyI18nString {
    data: I18nData,
}

impl Default for I18nData {
    fn default() -> Self {
        Self::Empty
    }
}

impl LazyI18nString {
    /// Creates a `LazyI18nString` from pre-built data.
    pub const fn new(data: I18nData) -> Self {
        Self { data }
    }

    /// Builds a `LazyI18nString` by resolving a gettext-style token through
    /// the translation catalog for every configured language.
    ///
    /// Languages without a catalog entry fall back to the token itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use i18nfield_core::{catalog, locale, LazyI18nString};
    ///
    /// locale::set_languages(&[("en", "English"), ("de", "German")]);
    /// catalog::register_translations("de", vec![("Welcome", "Willkommen")]);
    ///
    /// let s = LazyI18nString::from_gettext("Welcome");
    /// assert_eq!(s.localize_with("de", &["en"]), "Willkommen");
    /// assert_eq!(s.localize_with("en", &["en"]), "Welcome");
    /// ```
    pub fn from_gettext(msgid: &str) -> Self {
        let map = locale::language_codes()
            .into_iter()
            .map(|code| {
                let translated =
                    catalog::translate(&code, msgid).unwrap_or_else(|| msgid.to_string());
                (code, translated)
            })
            .collect();
        Self {
            data: I18nData::Localized(map),
        }
    }

    /// Reconstructs a value from its canonical storage form.
    ///
    /// `None` means the absent sentinel. This is the same code path as
    /// [`From<&str>`], so decode and construction cannot diverge.
    pub fn from_storage(raw: Option<&str>) -> Self {
        raw.map_or_else(
            || Self {
                data: I18nData::Empty,
            },
            Self::from,
        )
    }

    /// Returns the stored data shape.
    pub const fn data(&self) -> &I18nData {
        &self.data
    }

    /// Consumes the value, returning the stored data shape.
    pub fn into_data(self) -> I18nData {
        self.data
    }

    /// Returns `true` if there is no displayable variant: no data, an empty
    /// legacy string, or a mapping whose values are all empty.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            I18nData::Empty => true,
            I18nData::Legacy(s) => s.is_empty(),
            I18nData::Localized(map) => map.values().all(String::is_empty),
        }
    }

    /// Resolves the variant to display for `locale_code`, using the
    /// process-wide fallback chain (default language first, then every other
    /// configured language in declared order).
    pub fn localize(&self, locale_code: &str) -> String {
        self.localize_with(locale_code, &locale::fallback_chain())
    }

    /// Resolves the variant to display for `locale_code` against an explicit
    /// fallback chain.
    ///
    /// Precedence, first non-empty hit wins:
    ///
    /// 1. The exact key `locale_code`.
    /// 2. Base/informal substitution across the `-` separator, in both
    ///    directions: requesting `de-informal` can match `de`, and requesting
    ///    `de` can match `de-informal`.
    /// 3. The fallback chain, in priority order.
    /// 4. The empty string.
    ///
    /// Legacy data resolves to itself for every locale; empty data resolves
    /// to the empty string. This performs no mutation and is stable across
    /// repeated calls.
    pub fn localize_with<S: AsRef<str>>(&self, locale_code: &str, fallback_chain: &[S]) -> String {
        match &self.data {
            I18nData::Empty => String::new(),
            I18nData::Legacy(s) => s.clone(),
            I18nData::Localized(map) => {
                if let Some(value) = non_empty(map, locale_code) {
                    return value.clone();
                }
                let base = locale::base_code(locale_code);
                let prefix = format!("{base}-");
                for (key, value) in map {
                    if !value.is_empty() && (key == base || key.starts_with(&prefix)) {
                        return value.clone();
                    }
                }
                for code in fallback_chain {
                    if let Some(value) = non_empty(map, code.as_ref()) {
                        return value.clone();
                    }
                }
                String::new()
            }
        }
    }

    /// Applies `f` to every stored string value, in place.
    ///
    /// Legacy data is replaced with `f(data)`; localized data has every
    /// variant rewritten; empty data is untouched. The shape never changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use i18nfield_core::LazyI18nString;
    ///
    /// let mut s = LazyI18nString::from(r#"{"de": "hallo", "en": "hello"}"#);
    /// s.map(|v| v.to_uppercase());
    /// assert_eq!(s.localize_with("de", &["en"]), "HALLO");
    /// ```
    pub fn map<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        match &mut self.data {
            I18nData::Empty => {}
            I18nData::Legacy(s) => *s = f(s),
            I18nData::Localized(map) => {
                for value in map.values_mut() {
                    *value = f(value);
                }
            }
        }
    }

    /// Encodes this value into its canonical storage form.
    ///
    /// - Empty data encodes as `None` (the host's absent sentinel).
    /// - Localized data encodes as a JSON object containing exactly the
    ///   locales with non-empty values, keys sorted ascending.
    /// - Legacy data encodes as the bare string, with no JSON wrapping.
    ///
    /// Dropping empty variants is lossy by design: after a round trip, an
    /// explicitly stored empty variant is indistinguishable from an absent
    /// one. This matches the historical on-disk contract.
    pub fn to_storage(&self) -> Option<String> {
        match &self.data {
            I18nData::Empty => None,
            I18nData::Legacy(s) => Some(s.clone()),
            I18nData::Localized(map) => {
                let filtered: BTreeMap<&String, &String> =
                    map.iter().filter(|(_, v)| !v.is_empty()).collect();
                serde_json::to_string(&filtered).ok()
            }
        }
    }
}

fn non_empty<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a String> {
    map.get(key).filter(|v| !v.is_empty())
}

/// Parses raw text: a JSON object of string-to-string pairs becomes localized
/// data, anything else (plain text, malformed JSON, JSON of another shape)
/// is kept verbatim as a legacy value.
fn parse_raw(raw: &str) -> I18nData {
    if let Ok(serde_json::Value::Object(object)) = serde_json::from_str::<serde_json::Value>(raw) {
        let mut map = BTreeMap::new();
        for (key, value) in object {
            match value {
                serde_json::Value::String(s) => {
                    map.insert(key, s);
                }
                _ => return I18nData::Legacy(raw.to_string()),
            }
        }
        return I18nData::Localized(map);
    }
    I18nData::Legacy(raw.to_string())
}

impl From<&str> for LazyI18nString {
    fn from(raw: &str) -> Self {
        Self {
            data: parse_raw(raw),
        }
    }
}

impl From<String> for LazyI18nString {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<Option<&str>> for LazyI18nString {
    fn from(raw: Option<&str>) -> Self {
        Self::from_storage(raw)
    }
}

impl From<Option<String>> for LazyI18nString {
    fn from(raw: Option<String>) -> Self {
        Self::from_storage(raw.as_deref())
    }
}

impl From<BTreeMap<String, String>> for LazyI18nString {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self {
            data: I18nData::Localized(map),
        }
    }
}

impl From<I18nData> for LazyI18nString {
    fn from(data: I18nData) -> Self {
        Self { data }
    }
}

impl fmt::Display for LazyI18nString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.localize(&locale::get_language()))
    }
}

impl PartialEq<str> for LazyI18nString {
    fn eq(&self, other: &str) -> bool {
        self.data == Self::from(other).data
    }
}

impl PartialEq<&str> for LazyI18nString {
    fn eq(&self, other: &&str) -> bool {
        self.data == Self::from(*other).data
    }
}

impl PartialEq<BTreeMap<String, String>> for LazyI18nString {
    fn eq(&self, other: &BTreeMap<String, String>) -> bool {
        matches!(&self.data, I18nData::Localized(map) if map == other)
    }
}

impl Serialize for LazyI18nString {
    /// Serializes as the plain data: null, a bare string, or a locale map.
    ///
    /// This is what lets a `LazyI18nString` participate in generic
    /// structured encoders instead of appearing as an opaque object.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.data {
            I18nData::Empty => serializer.serialize_none(),
            I18nData::Legacy(s) => serializer.serialize_str(s),
            I18nData::Localized(map) => map.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LazyI18nString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Null => Ok(Self {
                data: I18nData::Empty,
            }),
            serde_json::Value::String(s) => Ok(Self::from(s.as_str())),
            serde_json::Value::Object(object) => {
                let mut map = BTreeMap::new();
                for (key, value) in object {
                    match value {
                        serde_json::Value::String(s) => {
                            map.insert(key, s);
                        }
                        other => {
                            return Err(D::Error::custom(format!(
                                "locale {key:?} must map to a string, got {other}"
                            )))
                        }
                    }
                }
                Ok(Self {
                    data: I18nData::Localized(map),
                })
            }
            other => Err(D::Error::custom(format!(
                "expected null, a string, or an object of strings, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LanguageOverride;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_create_from_string() {
        let s = LazyI18nString::from(r#"{"en": "Hello"}"#);
        assert_eq!(*s.data(), I18nData::Localized(map(&[("en", "Hello")])));

        let s = LazyI18nString::from("Invalid JSON");
        assert_eq!(*s.data(), I18nData::Legacy("Invalid JSON".to_string()));

        // JSON, but not an object of strings
        let s = LazyI18nString::from(r#"{"en": 5}"#);
        assert_eq!(*s.data(), I18nData::Legacy(r#"{"en": 5}"#.to_string()));
        let s = LazyI18nString::from("[1, 2]");
        assert_eq!(*s.data(), I18nData::Legacy("[1, 2]".to_string()));
    }

    #[test]
    fn test_explicit_translation() {
        let s = LazyI18nString::from(map(&[("de", "Hallo"), ("en", "Hello")]));
        {
            let _guard = LanguageOverride::new("en");
            assert_eq!(s.to_string(), "Hello");
        }
        {
            let _guard = LanguageOverride::new("de");
            assert_eq!(s.to_string(), "Hallo");
        }
        assert!(!s.is_empty());
    }

    #[test]
    fn test_similar_translations() {
        let s = LazyI18nString::from(map(&[("en", "You"), ("de", "Sie"), ("de-informal", "Du")]));
        assert_eq!(s.localize_with("de", &["en"]), "Sie");
        assert_eq!(s.localize_with("de-informal", &["en"]), "Du");

        let s = LazyI18nString::from(map(&[("en", "You"), ("de-informal", "Du")]));
        assert_eq!(s.localize_with("de", &["en"]), "Du");
        assert_eq!(s.localize_with("de-informal", &["en"]), "Du");

        let s = LazyI18nString::from(map(&[("en", "You"), ("de", "Sie")]));
        assert_eq!(s.localize_with("de", &["en"]), "Sie");
        assert_eq!(s.localize_with("de-informal", &["en"]), "Sie");
    }

    #[test]
    fn test_missing_default_translation() {
        let s = LazyI18nString::from(map(&[("de", "Hallo")]));
        assert_eq!(s.localize_with("en", &["en", "de"]), "Hallo");
        assert_eq!(s.localize_with("de", &["en", "de"]), "Hallo");
    }

    #[test]
    fn test_missing_translation() {
        let s = LazyI18nString::from(map(&[("en", "Hello")]));
        assert_eq!(s.localize_with("en", &["en"]), "Hello");
        assert_eq!(s.localize_with("de", &["en"]), "Hello");
    }

    #[test]
    fn test_empty_values_skipped_during_resolution() {
        let s = LazyI18nString::from(map(&[("de", ""), ("en", "Hello")]));
        assert_eq!(s.localize_with("de", &["en"]), "Hello");
    }

    #[test]
    fn test_legacy_string() {
        let s = LazyI18nString::from("Hello");
        assert_eq!(s.localize_with("en", &["en"]), "Hello");
        assert_eq!(s.localize_with("de", &["en"]), "Hello");
        assert_eq!(s.localize_with("zz-informal", &[] as &[&str]), "Hello");
        assert!(!s.is_empty());
    }

    #[test]
    fn test_none() {
        let s = LazyI18nString::from(None::<String>);
        assert_eq!(s.localize_with("en", &["en"]), "");
        assert!(s.is_empty());

        let s = LazyI18nString::from("");
        assert_eq!(s.localize_with("en", &["en"]), "");
        assert!(s.is_empty());

        let s = LazyI18nString::from(BTreeMap::new());
        assert_eq!(s.localize_with("en", &["en"]), "");
        assert!(s.is_empty());

        let s = LazyI18nString::from(map(&[("en", "")]));
        assert!(s.is_empty());
    }

    #[test]
    fn test_resolution_is_stable() {
        let s = LazyI18nString::from(map(&[("de", "Sie"), ("en", "You")]));
        let first = s.localize_with("de-informal", &["en"]);
        for _ in 0..3 {
            assert_eq!(s.localize_with("de-informal", &["en"]), first);
        }
    }

    #[test]
    fn test_equality() {
        let data = map(&[("en", "You"), ("de", "Sie")]);
        let s1 = LazyI18nString::from(data.clone());
        let s2 = LazyI18nString::from(data.clone());
        let s3 = LazyI18nString::from(map(&[("en", "I"), ("de", "Ich")]));
        assert_eq!(s1, s2);
        assert_ne!(s2, s3);
        assert_eq!(s1, data);
        assert_eq!(LazyI18nString::from("Hello"), "Hello");
        assert_ne!(LazyI18nString::from("Hello"), "Bye");
    }

    #[test]
    fn test_from_gettext() {
        locale::set_languages(&[("en", "English"), ("de", "German")]);
        catalog::register_translations("de", vec![("Welcome", "Willkommen")]);

        let s = LazyI18nString::from_gettext("Welcome");
        match s.data() {
            I18nData::Localized(map) => {
                assert_eq!(map.get("de"), Some(&"Willkommen".to_string()));
                assert_eq!(map.get("en"), Some(&"Welcome".to_string()));
            }
            other => panic!("expected localized data, got {other:?}"),
        }
    }

    #[test]
    fn test_map() {
        let mut s = LazyI18nString::from(map(&[("de", "hallo"), ("en", "hello")]));
        s.map(|v| v.to_uppercase());
        assert_eq!(s.localize_with("en", &["en"]), "HELLO");
        assert_eq!(s.localize_with("de", &["en"]), "HALLO");

        let mut s = LazyI18nString::from("hello");
        s.map(|v| v.to_uppercase());
        assert_eq!(s, "HELLO");

        let mut s = LazyI18nString::from(None::<String>);
        s.map(|v| v.to_uppercase());
        assert!(s.is_empty());
    }

    #[test]
    fn test_storage_round_trip() {
        let original = LazyI18nString::from(map(&[("de", "Hallo"), ("en", "Hello")]));
        let encoded = original.to_storage().unwrap();
        assert_eq!(encoded, r#"{"de":"Hallo","en":"Hello"}"#);
        let decoded = LazyI18nString::from_storage(Some(&encoded));
        assert_eq!(decoded, original);
        for lng in ["de", "en", "fr", "de-informal"] {
            assert_eq!(
                decoded.localize_with(lng, &["en"]),
                original.localize_with(lng, &["en"])
            );
        }
    }

    #[test]
    fn test_storage_keys_sorted() {
        let s = LazyI18nString::from(map(&[("fr", "c"), ("de", "a"), ("en", "b")]));
        assert_eq!(s.to_storage().unwrap(), r#"{"de":"a","en":"b","fr":"c"}"#);
    }

    #[test]
    fn test_storage_drops_empties() {
        let s = LazyI18nString::from(map(&[("en", "x"), ("de", "")]));
        assert_eq!(s.to_storage().unwrap(), r#"{"en":"x"}"#);
    }

    #[test]
    fn test_storage_legacy_and_empty() {
        assert_eq!(LazyI18nString::from("Hello").to_storage().unwrap(), "Hello");
        assert_eq!(LazyI18nString::from(None::<String>).to_storage(), None);
    }

    #[test]
    fn test_serialize_as_plain_data() {
        #[derive(Serialize)]
        struct Book {
            title: LazyI18nString,
            subtitle: LazyI18nString,
            note: LazyI18nString,
        }
        let book = Book {
            title: LazyI18nString::from(map(&[("de", "Buch"), ("en", "Book")])),
            subtitle: LazyI18nString::from("plain"),
            note: LazyI18nString::from(None::<String>),
        };
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": {"de": "Buch", "en": "Book"},
                "subtitle": "plain",
                "note": null,
            })
        );
    }

    #[test]
    fn test_deserialize() {
        let s: LazyI18nString = serde_json::from_str(r#"{"en": "Hello"}"#).unwrap();
        assert_eq!(s, map(&[("en", "Hello")]));

        let s: LazyI18nString = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(s, "Hello");

        let s: LazyI18nString = serde_json::from_str("null").unwrap();
        assert!(s.is_empty());

        let err = serde_json::from_str::<LazyI18nString>(r#"{"en": 5}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<LazyI18nString>("[1]");
        assert!(err.is_err());
    }
}
