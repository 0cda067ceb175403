//! Locale configuration and the ambient active locale.
//!
//! The process-wide locale configuration holds the ordered list of languages
//! the host supports and the default language. It backs the fallback chain
//! used by [`LazyI18nString::localize`](crate::string::LazyI18nString::localize)
//! and the default locale list of multi-locale form fields.
//!
//! The *active* locale is thread-local state used only for implicit string
//! coercion (`Display`). Hosts should set and restore it around each unit of
//! work, preferably via the [`LanguageOverride`] guard.

use std::cell::RefCell;
use std::sync::{OnceLock, RwLock};

/// The process-wide locale configuration.
#[derive(Debug, Clone)]
struct LocaleConfig {
    /// Supported languages as `(code, display name)` pairs, in declared order.
    languages: Vec<(String, String)>,
    /// The default language code.
    default_language: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            languages: vec![("en".to_string(), "English".to_string())],
            default_language: "en".to_string(),
        }
    }
}

fn global_config() -> &'static RwLock<LocaleConfig> {
    static CONFIG: OnceLock<RwLock<LocaleConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(LocaleConfig::default()))
}

/// Replaces the configured language list.
///
/// Each entry is a `(code, display name)` pair. The declared order is
/// significant: it is the slot order of multi-locale fields and the
/// tie-breaking order of the fallback chain.
///
/// # Examples
///
/// ```
/// use i18nfield_core::locale;
///
/// locale::set_languages(&[("de", "German"), ("en", "English"), ("fr", "French")]);
/// assert!(locale::is_known_language("fr"));
/// ```
pub fn set_languages(entries: &[(&str, &str)]) {
    let mut config = global_config().write().expect("locale config lock poisoned");
    config.languages = entries
        .iter()
        .map(|(code, name)| ((*code).to_string(), (*name).to_string()))
        .collect();
}

/// Sets the default language code.
pub fn set_default_language(code: &str) {
    let mut config = global_config().write().expect("locale config lock poisoned");
    config.default_language = code.to_string();
}

/// Returns the configured language codes, in declared order.
pub fn language_codes() -> Vec<String> {
    let config = global_config().read().expect("locale config lock poisoned");
    config.languages.iter().map(|(code, _)| code.clone()).collect()
}

/// Returns the configured languages as `(code, display name)` pairs.
pub fn languages() -> Vec<(String, String)> {
    let config = global_config().read().expect("locale config lock poisoned");
    config.languages.clone()
}

/// Returns the default language code.
pub fn default_language() -> String {
    let config = global_config().read().expect("locale config lock poisoned");
    config.default_language.clone()
}

/// Returns `true` if `code` is one of the configured language codes.
pub fn is_known_language(code: &str) -> bool {
    let config = global_config().read().expect("locale config lock poisoned");
    config.languages.iter().any(|(c, _)| c == code)
}

/// Returns the configured fallback chain: the default language first, then
/// every other configured language in declared order.
pub fn fallback_chain() -> Vec<String> {
    let config = global_config().read().expect("locale config lock poisoned");
    let mut chain = vec![config.default_language.clone()];
    for (code, _) in &config.languages {
        if *code != config.default_language {
            chain.push(code.clone());
        }
    }
    chain
}

/// Returns the base code of a locale, stripping any regional or informal
/// suffix: `base_code("de-informal") == "de"`.
pub fn base_code(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

// ── Thread-local active locale ───────────────────────────────────────────

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Activates the given language code for the current thread.
///
/// Subsequent implicit coercions (`Display`) of
/// [`LazyI18nString`](crate::string::LazyI18nString) values on this thread
/// resolve against this locale.
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's language setting, reverting to the
/// configured default language.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language code active on the current thread.
///
/// Returns the activated language if one is set, otherwise the configured
/// default language.
pub fn get_language() -> String {
    CURRENT_LANGUAGE.with(|cell| cell.borrow().clone().unwrap_or_else(default_language))
}

/// A scoped language activation.
///
/// Activates a language on construction and restores the previously active
/// language (or the deactivated state) when dropped, on all exit paths.
///
/// # Examples
///
/// ```
/// use i18nfield_core::locale::{self, LanguageOverride};
///
/// {
///     let _guard = LanguageOverride::new("de");
///     assert_eq!(locale::get_language(), "de");
/// }
/// assert_eq!(locale::get_language(), locale::default_language());
/// ```
#[derive(Debug)]
pub struct LanguageOverride {
    previous: Option<String>,
}

impl LanguageOverride {
    /// Activates `language_code`, remembering the previously active language.
    pub fn new(language_code: &str) -> Self {
        let previous = CURRENT_LANGUAGE.with(|cell| cell.borrow().clone());
        activate(language_code);
        Self { previous }
    }
}

impl Drop for LanguageOverride {
    fn drop(&mut self) {
        CURRENT_LANGUAGE.with(|cell| {
            *cell.borrow_mut() = self.previous.take();
        });
    }
}
