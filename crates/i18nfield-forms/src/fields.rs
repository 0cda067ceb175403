//! The multi-locale form field.
//!
//! An [`I18nFormField`] composes a fixed, ordered list of locale codes into
//! one logical field: it splits a [`LazyI18nString`] into per-locale slot
//! values for editing, recombines edited slots back into a value, and
//! enforces the `one_required` / `all_required` policies over the enabled
//! subset of locales.

use std::collections::BTreeMap;

use i18nfield_core::{locale, I18nError, I18nResult, LazyI18nString, ValidationError};

use crate::validation::{clean_slot_value, Validator};
use crate::widgets::{I18nWidget, I18nWidgetType};

/// The input handed to [`I18nFormField::clean`].
///
/// A disabled or pre-resolved field hands back the value it was given; an
/// edited field hands back the per-locale slot values aligned to the
/// configured locale list.
#[derive(Debug, Clone)]
pub enum I18nFormValue {
    /// An already-composed value; returned unchanged without validation.
    Value(LazyI18nString),
    /// Per-locale slot values, slot `i` belonging to `langcodes[i]`.
    Data(Vec<Option<String>>),
}

impl From<LazyI18nString> for I18nFormValue {
    fn from(value: LazyI18nString) -> Self {
        Self::Value(value)
    }
}

impl From<Vec<Option<String>>> for I18nFormValue {
    fn from(data: Vec<Option<String>>) -> Self {
        Self::Data(data)
    }
}

/// A form field with one sub-input per configured locale.
///
/// The configured locale list is fixed at construction; the enabled subset
/// may be narrowed per form instance and decides which slots participate in
/// validation and which slot legacy data is decomposed into. Slot indices
/// are stable either way.
///
/// # Examples
///
/// ```
/// use i18nfield_forms::fields::I18nFormField;
///
/// let field = I18nFormField::new()
///     .langcodes(&["de", "en"])
///     .max_length(200);
/// let value = field
///     .clean(vec![Some("Hallo".to_string()), None].into())
///     .unwrap();
/// assert_eq!(value.localize_with("de", &["en"]), "Hallo");
/// ```
#[derive(Debug)]
pub struct I18nFormField {
    langcodes: Vec<String>,
    one_required: bool,
    all_required: bool,
    min_length: Option<usize>,
    max_length: Option<usize>,
    validators: Vec<Box<dyn Validator>>,
    widget: I18nWidget,
}

impl Default for I18nFormField {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nFormField {
    /// Creates a field over every configured language, with `one_required`
    /// set (at least one enabled locale must be filled).
    pub fn new() -> Self {
        let langcodes = locale::language_codes();
        Self {
            widget: I18nWidget::new(I18nWidgetType::TextInput, langcodes.clone()),
            langcodes,
            one_required: true,
            all_required: false,
            min_length: None,
            max_length: None,
            validators: Vec::new(),
        }
    }

    /// Sets the configured locale codes, replacing the default list.
    #[must_use]
    pub fn langcodes(mut self, codes: &[&str]) -> Self {
        self.langcodes = codes.iter().map(|s| (*s).to_string()).collect();
        self.widget = I18nWidget::new(self.widget.widget_type(), self.langcodes.clone());
        self
    }

    /// Narrows the enabled subset of locales.
    ///
    /// Enabled locales are the only ones validated and rendered; disabled
    /// slots keep their indices and pass their retained values through
    /// composition untouched.
    #[must_use]
    pub fn enabled_langcodes(mut self, codes: &[&str]) -> Self {
        self.widget.set_enabled_langcodes(codes);
        self
    }

    /// Sets whether at least one enabled locale must be non-empty.
    #[must_use]
    pub const fn one_required(mut self, required: bool) -> Self {
        self.one_required = required;
        self
    }

    /// Sets whether every enabled locale must be non-empty.
    ///
    /// Independent of [`one_required`](Self::one_required); when both are
    /// set, this stricter condition subsumes the other.
    #[must_use]
    pub const fn all_required(mut self, required: bool) -> Self {
        self.all_required = required;
        self
    }

    /// Sets the per-slot minimum length.
    #[must_use]
    pub const fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the per-slot maximum length.
    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Switches the sub-input widget (text input or textarea).
    #[must_use]
    pub fn widget(mut self, widget_type: I18nWidgetType) -> Self {
        let enabled: Vec<&str> = self
            .widget
            .enabled_langcodes()
            .iter()
            .map(String::as_str)
            .collect();
        let mut widget = I18nWidget::new(widget_type, self.langcodes.clone());
        widget.set_enabled_langcodes(&enabled);
        self.widget = widget;
        self
    }

    /// Adds a validator run against the composed value.
    #[must_use]
    pub fn validator(mut self, validator: Box<dyn Validator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// The configured locale codes, in slot order.
    pub fn configured_langcodes(&self) -> &[String] {
        &self.langcodes
    }

    /// The widget rendering this field.
    pub const fn widget_ref(&self) -> &I18nWidget {
        &self.widget
    }

    /// Splits a value into per-locale slot values (see
    /// [`I18nWidget::decompress`]).
    pub fn decompress(&self, value: &LazyI18nString) -> Vec<Option<String>> {
        self.widget.decompress(value)
    }

    /// Recombines per-locale slot values into a single value.
    ///
    /// Slot `i` maps to `langcodes[i]`; absent slots contribute no key.
    /// Non-enabled slots that were never edited pass through whatever was
    /// decomposed into them, so disabling a locale does not destroy its
    /// stored value.
    pub fn compress(&self, data: &[Option<String>]) -> LazyI18nString {
        let mut map = BTreeMap::new();
        for (i, lng) in self.langcodes.iter().enumerate() {
            if let Some(value) = data.get(i).and_then(Option::as_ref) {
                map.insert(lng.clone(), value.clone());
            }
        }
        LazyI18nString::from(map)
    }

    /// Validates and combines per-locale slot values into a `LazyI18nString`.
    ///
    /// An [`I18nFormValue::Value`] passes through unchanged (the disabled /
    /// pre-resolved case). Otherwise:
    ///
    /// 1. every *enabled* slot is cleaned individually, with all errors
    ///    collected and reported together keyed by locale;
    /// 2. the `all_required` policy reports every empty enabled slot, the
    ///    `one_required` policy fires when no enabled slot is filled;
    /// 3. the slots are compressed and the field's validators run against
    ///    the composed value.
    ///
    /// Disabled slots skip validation and the policies but still pass
    /// through into the composed value.
    pub fn clean(&self, value: I18nFormValue) -> I18nResult<LazyI18nString> {
        let data = match value {
            I18nFormValue::Value(s) => return Ok(s),
            I18nFormValue::Data(data) => data,
        };
        let enabled = self.widget.enabled_langcodes();

        let mut clean_data: Vec<Option<String>> = Vec::with_capacity(self.langcodes.len());
        let mut locale_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut empty_enabled: Vec<String> = Vec::new();
        let mut found = false;

        for (i, lng) in self.langcodes.iter().enumerate() {
            let raw = data.get(i).cloned().flatten();
            if !enabled.contains(lng) {
                clean_data.push(raw);
                continue;
            }
            match clean_slot_value(raw.as_deref(), self.min_length, self.max_length) {
                Ok(cleaned) => {
                    if cleaned.is_empty() {
                        empty_enabled.push(lng.clone());
                        clean_data.push(raw.map(|_| cleaned));
                    } else {
                        found = true;
                        clean_data.push(Some(cleaned));
                    }
                }
                Err(errors) => {
                    locale_errors.insert(lng.clone(), errors);
                    clean_data.push(raw);
                }
            }
        }

        if !locale_errors.is_empty() {
            tracing::debug!(locales = ?locale_errors.keys().collect::<Vec<_>>(), "slot validation failed");
            return Err(I18nError::Validation(ValidationError::with_locale_errors(
                locale_errors,
            )));
        }
        if self.all_required && !empty_enabled.is_empty() {
            return Err(I18nError::Required {
                empty_locales: empty_enabled,
            });
        }
        if self.one_required && !found {
            return Err(I18nError::Required {
                empty_locales: enabled.to_vec(),
            });
        }

        let out = self.compress(&clean_data);
        for validator in &self.validators {
            validator.validate(&out).map_err(I18nError::Validation)?;
        }
        Ok(out)
    }
}
