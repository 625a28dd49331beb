use serde_json::Value;
use std::collections::HashMap;
use std::env;

use crate::view::View;

const EN_MESSAGES: &str = include_str!("../i18n/en.json");

#[derive(Clone, Debug)]
pub struct I18n {
    locale: String,
    messages: HashMap<String, String>,
}

impl I18n {
    /// Catalog for the locale found in the environment.
    pub fn detect() -> Self {
        Self::for_locale(&detect_locale())
    }

    pub fn for_locale(locale: &str) -> Self {
        let locale = normalize_locale(locale).unwrap_or_else(|| "en".to_string());
        let messages = load_messages(&locale);
        Self { locale, messages }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut value = self.t(key);
        for (param, replacement) in params {
            value = value.replace(&format!("{{{param}}}"), replacement);
        }
        value
    }

    /// Sidebar label of a view.
    pub fn view_label(&self, view: View) -> String {
        self.t(&view.label_key())
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::for_locale("en")
    }
}

fn normalize_locale(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed
        .split('.')
        .next()
        .unwrap_or(trimmed)
        .replace('-', "_")
        .to_lowercase();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

fn detect_locale() -> String {
    let candidates = ["LC_ALL", "LC_MESSAGES", "LANG"];
    for key in candidates {
        if let Ok(value) = env::var(key) {
            if let Some(locale) = normalize_locale(&value) {
                return locale;
            }
        }
    }
    "en".to_string()
}

fn load_messages(locale: &str) -> HashMap<String, String> {
    // English is the only bundled catalog; other locales fall back to it.
    if !locale.starts_with("en") {
        tracing::debug!("No catalog for locale {}, using English", locale);
    }

    match serde_json::from_str::<Value>(EN_MESSAGES) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect(),
        _ => HashMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key() {
        let i18n = I18n::default();
        assert_eq!(i18n.t("app.name"), "SnakeEngine.AI");
    }

    #[test]
    fn test_missing_key_echoes_key() {
        let i18n = I18n::default();
        assert_eq!(i18n.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_format_substitutes_params() {
        let i18n = I18n::default();
        assert_eq!(
            i18n.format("persona.announcement", &[("persona", "Pirate")]),
            "Persona set! I am now: Pirate"
        );
    }

    #[test]
    fn test_every_view_has_a_label() {
        let i18n = I18n::default();
        for view in View::all() {
            assert_ne!(i18n.view_label(view), view.label_key(), "{view} unlabeled");
        }
    }

    #[test]
    fn test_locale_normalization() {
        assert_eq!(I18n::for_locale("en-US.UTF-8").locale(), "en_us");
        assert_eq!(I18n::for_locale("   ").locale(), "en");
        assert_eq!(I18n::for_locale("fr_FR").t("view.chat"), "Chat");
    }
}
