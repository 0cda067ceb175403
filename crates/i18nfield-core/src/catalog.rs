//! Translation catalog for message lookups.
//!
//! The catalog stores translations in a global, thread-safe registry
//! organized by language code. It exists to feed
//! [`LazyI18nString::from_gettext`](crate::string::LazyI18nString::from_gettext):
//! a gettext-style token is resolved through the catalog for every configured
//! language at construction time.

use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use crate::locale;

/// The global translation registry: language code -> (msgid -> translation).
fn global_catalogs() -> &'static RwLock<HashMap<String, HashMap<String, String>>> {
    static CATALOGS: OnceLock<RwLock<HashMap<String, HashMap<String, String>>>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Registers message translations for a language.
///
/// Each entry is a `(msgid, translated)` pair. If translations already exist
/// for the language, the new entries are merged (overwriting duplicates).
///
/// # Examples
///
/// ```
/// use i18nfield_core::catalog;
///
/// catalog::register_translations("fr", vec![
///     ("Hello", "Bonjour"),
///     ("Goodbye", "Au revoir"),
/// ]);
/// assert_eq!(catalog::translate("fr", "Hello"), Some("Bonjour".to_string()));
/// ```
pub fn register_translations(language: &str, entries: Vec<(&str, &str)>) {
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    let catalog = catalogs.entry(language.to_string()).or_default();
    for (msgid, translated) in entries {
        catalog.insert(msgid.to_string(), translated.to_string());
    }
    tracing::debug!(language, "registered catalog translations");
}

/// Looks up the translation of `msgid` for the given language.
///
/// Returns `None` if no catalog exists for the language or the catalog has
/// no entry for `msgid`.
pub fn translate(language: &str, msgid: &str) -> Option<String> {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.get(language).and_then(|c| c.get(msgid).cloned())
}

/// Translates a message using the current thread's active language.
///
/// If no translation is found, returns the original `msgid`.
pub fn gettext(msgid: &str) -> String {
    let lang = locale::get_language();
    translate(&lang, msgid).unwrap_or_else(|| msgid.to_string())
}
