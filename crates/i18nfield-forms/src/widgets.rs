//! Widgets for rendering one sub-input per locale.
//!
//! An [`I18nWidget`] owns the ordered list of configured locale codes and the
//! enabled subset, and knows how to split a
//! [`LazyI18nString`] into per-locale slot values (`decompress`), render the
//! enabled slots as HTML, and read the slots back from submitted form data.
//!
//! Slot `i` always corresponds to `langcodes[i]`, whether or not that locale
//! is enabled.

use std::collections::HashMap;
use std::fmt;

use i18nfield_core::{I18nData, LazyI18nString};

/// The kind of sub-input rendered for each locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I18nWidgetType {
    /// `<input type="text">` per locale.
    TextInput,
    /// `<textarea>` per locale.
    Textarea,
}

impl fmt::Display for I18nWidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextInput => "TextInput",
            Self::Textarea => "Textarea",
        };
        write!(f, "{name}")
    }
}

/// A multi-slot widget holding one sub-input per configured locale.
#[derive(Debug, Clone)]
pub struct I18nWidget {
    langcodes: Vec<String>,
    enabled_langcodes: Vec<String>,
    widget: I18nWidgetType,
    attrs: HashMap<String, String>,
}

impl I18nWidget {
    /// Creates a widget for the given locale codes, all enabled.
    pub fn new(widget: I18nWidgetType, langcodes: Vec<String>) -> Self {
        Self {
            enabled_langcodes: langcodes.clone(),
            langcodes,
            widget,
            attrs: HashMap::new(),
        }
    }

    /// Narrows the enabled subset.
    ///
    /// The configured list keeps its order and size; only membership in the
    /// enabled view changes. Requested codes outside the configured list are
    /// ignored.
    pub fn set_enabled_langcodes(&mut self, enabled: &[&str]) {
        self.enabled_langcodes = self
            .langcodes
            .iter()
            .filter(|code| enabled.contains(&code.as_str()))
            .cloned()
            .collect();
    }

    /// Sets an HTML attribute applied to every rendered sub-input.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// The kind of sub-input this widget renders.
    pub const fn widget_type(&self) -> I18nWidgetType {
        self.widget
    }

    /// The configured locale codes, in slot order.
    pub fn langcodes(&self) -> &[String] {
        &self.langcodes
    }

    /// The enabled subset, in configured order.
    pub fn enabled_langcodes(&self) -> &[String] {
        &self.enabled_langcodes
    }

    /// Splits a value into per-locale slot values, one per configured locale.
    ///
    /// - Localized data: slot `i` gets the entry for `langcodes[i]`, if any.
    /// - Legacy data goes into the slot of the first enabled locale; a legacy
    ///   value carries no locale information and is assumed to belong to
    ///   whichever locale comes first in the enabled subset.
    /// - Localized data with no non-empty enabled entry but other populated
    ///   entries: the first enabled slot receives the value resolved for the
    ///   first enabled locale, so the rendered form never shows nothing for a
    ///   non-empty value whose only populated key is outside the enabled
    ///   subset.
    pub fn decompress(&self, value: &LazyI18nString) -> Vec<Option<String>> {
        let mut data: Vec<Option<String>> = self
            .langcodes
            .iter()
            .map(|lng| match value.data() {
                I18nData::Localized(map) => map.get(lng).cloned(),
                _ => None,
            })
            .collect();

        let Some(first_enabled) = self
            .langcodes
            .iter()
            .position(|lng| self.enabled_langcodes.contains(lng))
        else {
            return data;
        };

        match value.data() {
            I18nData::Legacy(s) if !s.is_empty() => {
                data[first_enabled] = Some(s.clone());
            }
            I18nData::Localized(_) if !value.is_empty() => {
                let any_enabled_filled = self.langcodes.iter().zip(&data).any(|(lng, slot)| {
                    self.enabled_langcodes.contains(lng)
                        && slot.as_deref().is_some_and(|v| !v.is_empty())
                });
                if !any_enabled_filled {
                    data[first_enabled] =
                        Some(value.localize_with(&self.enabled_langcodes[0], &self.langcodes));
                }
            }
            _ => {}
        }
        data
    }

    /// Renders one sub-input per *enabled* locale, wrapped in a
    /// `<div class="i18n-form-group">`.
    ///
    /// Sub-inputs are named `{name}_{i}` where `i` is the configured slot
    /// index, so disabled locales keep their indices on submission. An `id`
    /// attribute, if supplied, becomes `{id}_{i}` with a `title` naming the
    /// locale.
    pub fn render(
        &self,
        name: &str,
        value: &LazyI18nString,
        attrs: &HashMap<String, String>,
    ) -> String {
        let values = self.decompress(value);
        let id = attrs.get("id").cloned();
        let mut output = String::new();
        for (i, lng) in self.langcodes.iter().enumerate() {
            if !self.enabled_langcodes.contains(lng) {
                continue;
            }
            let mut final_attrs = self.attrs.clone();
            final_attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
            final_attrs.insert("lang".to_string(), lng.clone());
            if let Some(id) = &id {
                final_attrs.insert("id".to_string(), format!("{id}_{i}"));
                final_attrs.insert("title".to_string(), lng.clone());
            }
            output.push_str(&render_subwidget(
                self.widget,
                &format!("{name}_{i}"),
                values[i].as_deref().unwrap_or(""),
                &final_attrs,
            ));
        }
        format!(r#"<div class="i18n-form-group">{output}</div>"#)
    }

    /// Reads the per-locale slot values from submitted form data.
    ///
    /// Slot `i` comes from the `{name}_{i}` key; absent keys yield `None`.
    pub fn value_from_data(
        &self,
        data: &HashMap<String, String>,
        name: &str,
    ) -> Vec<Option<String>> {
        (0..self.langcodes.len())
            .map(|i| data.get(&format!("{name}_{i}")).cloned())
            .collect()
    }
}

/// Formats an HTML attributes map into a string like ` key="value" key2="value2"`.
fn render_attrs(attrs: &HashMap<String, String>) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let mut parts: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{v}""#))
        .collect();
    parts.sort(); // deterministic output for testing
    parts.join("")
}

fn render_subwidget(
    widget: I18nWidgetType,
    name: &str,
    value: &str,
    attrs: &HashMap<String, String>,
) -> String {
    match widget {
        I18nWidgetType::TextInput => format!(
            r#"<input type="text" name="{name}" value="{value}"{} />"#,
            render_attrs(attrs)
        ),
        I18nWidgetType::Textarea => format!(
            r#"<textarea name="{name}"{}>{value}</textarea>"#,
            render_attrs(attrs)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn localized(entries: &[(&str, &str)]) -> LazyI18nString {
        let map: BTreeMap<String, String> = entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        LazyI18nString::from(map)
    }

    #[test]
    fn test_decompress_localized() {
        let widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        let value = localized(&[("de", "Hallo"), ("fr", "Bonjour")]);
        assert_eq!(
            widget.decompress(&value),
            vec![Some("Hallo".to_string()), None, Some("Bonjour".to_string())]
        );
    }

    #[test]
    fn test_decompress_legacy_goes_to_first_enabled() {
        let mut widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        widget.set_enabled_langcodes(&["en", "fr"]);
        let value = LazyI18nString::from("Hello");
        assert_eq!(
            widget.decompress(&value),
            vec![None, Some("Hello".to_string()), None]
        );
    }

    #[test]
    fn test_decompress_disabled_only_data_surfaces() {
        let mut widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        widget.set_enabled_langcodes(&["en", "fr"]);
        let value = localized(&[("de", "Hallo")]);
        // The only populated key is disabled; the first enabled slot shows
        // the resolved value so the form is not silently blank.
        assert_eq!(
            widget.decompress(&value),
            vec![Some("Hallo".to_string()), Some("Hallo".to_string()), None]
        );
    }

    #[test]
    fn test_decompress_no_fallback_when_enabled_slot_filled() {
        let mut widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        widget.set_enabled_langcodes(&["en", "fr"]);
        let value = localized(&[("de", "Hallo"), ("fr", "Bonjour")]);
        assert_eq!(
            widget.decompress(&value),
            vec![Some("Hallo".to_string()), None, Some("Bonjour".to_string())]
        );
    }

    #[test]
    fn test_decompress_empty_value() {
        let widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en"]));
        assert_eq!(
            widget.decompress(&LazyI18nString::from(None::<String>)),
            vec![None, None]
        );
        assert_eq!(
            widget.decompress(&LazyI18nString::from("")),
            vec![None, None]
        );
    }

    #[test]
    fn test_set_enabled_keeps_configured_order() {
        let mut widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        widget.set_enabled_langcodes(&["fr", "de", "zz"]);
        assert_eq!(widget.enabled_langcodes(), codes(&["de", "fr"]));
        assert_eq!(widget.langcodes(), codes(&["de", "en", "fr"]));
    }

    #[test]
    fn test_render_skips_disabled_but_keeps_indices() {
        let mut widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        widget.set_enabled_langcodes(&["en", "fr"]);
        let value = localized(&[("en", "Hello"), ("fr", "Bonjour")]);
        let html = widget.render("title", &value, &HashMap::new());
        assert!(html.starts_with(r#"<div class="i18n-form-group">"#));
        assert!(!html.contains("title_0"));
        assert!(html.contains(r#"name="title_1" value="Hello""#));
        assert!(html.contains(r#"name="title_2" value="Bonjour""#));
        assert!(html.contains(r#"lang="en""#));
    }

    #[test]
    fn test_render_textarea_with_id() {
        let widget = I18nWidget::new(I18nWidgetType::Textarea, codes(&["de"]));
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), "id_title".to_string());
        let html = widget.render("title", &localized(&[("de", "Hallo")]), &attrs);
        assert!(html.contains(r#"<textarea name="title_0""#));
        assert!(html.contains(r#"id="id_title_0""#));
        assert!(html.contains(r#"title="de""#));
        assert!(html.contains(">Hallo</textarea>"));
    }

    #[test]
    fn test_value_from_data() {
        let widget = I18nWidget::new(I18nWidgetType::TextInput, codes(&["de", "en", "fr"]));
        let mut data = HashMap::new();
        data.insert("title_0".to_string(), "Hallo".to_string());
        data.insert("title_2".to_string(), "Bonjour".to_string());
        assert_eq!(
            widget.value_from_data(&data, "title"),
            vec![Some("Hallo".to_string()), None, Some("Bonjour".to_string())]
        );
    }
}
