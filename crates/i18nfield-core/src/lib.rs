//! # i18nfield-core
//!
//! Core types for i18nfield-rs: lazy internationalized string values, locale
//! configuration, a translation catalog, and the canonical storage encoding.
//!
//! ## Modules
//!
//! - [`string`] - [`LazyI18nString`] and its resolution algorithm
//! - [`locale`] - Configured languages, fallback chain, and the thread-local active locale
//! - [`catalog`] - Translation catalog backing [`LazyI18nString::from_gettext`]
//! - [`storage`] - Encode/decode glue for a backing store
//! - [`error`] - Error types and result alias
//! - [`logging`] - Tracing-based logging setup

pub mod catalog;
pub mod error;
pub mod locale;
pub mod logging;
pub mod storage;
pub mod string;

// Re-export the most commonly used types at the crate root.
pub use error::{I18nError, I18nResult, ValidationError};
pub use string::{I18nData, LazyI18nString};
