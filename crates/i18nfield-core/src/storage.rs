//! Storage adapter for internationalized string columns.
//!
//! The backing store holds either a bare string (legacy, pre-multi-locale
//! data) or a JSON object mapping locale code to value, keys sorted
//! ascending, only non-empty entries present. This module is the glue a
//! model-field layer needs: decode on read, encode on write, and an
//! unconditional rejection of content lookups.

use crate::error::{I18nError, I18nResult};
use crate::string::LazyI18nString;

/// Converts a raw stored value into a `LazyI18nString`.
///
/// `None` stays `None` so that a SQL `NULL` survives as an absent value
/// rather than an empty one. Values that are already decoded pass through
/// [`LazyI18nString::from_storage`] unchanged in meaning.
pub fn to_python(value: Option<&str>) -> Option<LazyI18nString> {
    value.map(LazyI18nString::from)
}

/// Decodes a value read from the database.
///
/// Unlike [`to_python`], a `NULL` becomes an empty `LazyI18nString`, which
/// is what display code wants to work with.
pub fn from_db_value(value: Option<&str>) -> LazyI18nString {
    tracing::trace!(present = value.is_some(), "decoding i18n value from storage");
    LazyI18nString::from_storage(value)
}

/// Encodes a value for persistence.
///
/// Returns `None` for absent data; the caller maps that to its own absent
/// sentinel (SQL `NULL`, a missing key, etc.).
pub fn get_prep_value(value: &LazyI18nString) -> Option<String> {
    value.to_storage()
}

/// Rejects a storage-level lookup on internationalized string content.
///
/// Locale strings deliberately offer no comparison or ordering operators
/// for querying; there is no meaningful single string to compare against.
pub fn prep_lookup(lookup_type: &str) -> I18nResult<()> {
    Err(I18nError::UnsupportedLookup(lookup_type.to_string()))
}
