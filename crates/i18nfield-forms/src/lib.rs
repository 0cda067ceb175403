//! # i18nfield-forms
//!
//! Multi-locale form fields for i18nfield-rs. Provides the
//! [`I18nFormField`] that renders one sub-input per locale, splits and
//! recombines [`LazyI18nString`](i18nfield_core::LazyI18nString) values, and
//! enforces `one_required` / `all_required` policies over an enabled subset
//! of locales.

pub mod fields;
pub mod validation;
pub mod widgets;

pub use fields::{I18nFormField, I18nFormValue};
pub use validation::{MaxLengthValidator, MinLengthValidator, Validator};
pub use widgets::{I18nWidget, I18nWidgetType};
