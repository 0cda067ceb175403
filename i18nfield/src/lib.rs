//! # i18nfield
//!
//! Internationalized string values and multi-locale form fields for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `i18nfield` to get everything, or depend on
//! individual crates for finer-grained control.
//!
//! ## Quick start
//!
//! ```
//! use i18nfield::core::LazyI18nString;
//!
//! let title = LazyI18nString::from(r#"{"de": "Der Prozess", "en": "The Trial"}"#);
//! assert_eq!(title.localize_with("de", &["en"]), "Der Prozess");
//! assert_eq!(title.localize_with("fr", &["en"]), "The Trial");
//! ```

/// Core types: [`LazyI18nString`](i18nfield_core::LazyI18nString), locale
/// configuration, the translation catalog, and the storage contract.
pub use i18nfield_core as core;

/// Multi-locale form fields, widgets, and required-policy validation.
#[cfg(feature = "forms")]
pub use i18nfield_forms as forms;

/// The REST/API type adapter.
#[cfg(feature = "rest")]
pub use i18nfield_rest as rest;

// Third-party re-exports for user convenience
pub use serde;
pub use serde_json;
pub use tracing;

pub use i18nfield_core::{I18nData, I18nError, I18nResult, LazyI18nString, ValidationError};
