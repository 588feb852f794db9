//! Configuration
//!
//! Declarative language configuration, loadable from JSON, building the
//! registries the resolver and localizer consume.

use crate::{AreaLanguages, Language, LanguageFactory, Languages, Result};
use serde::Deserialize;
use std::path::Path;

fn default_area() -> String {
    "default".to_string()
}

fn default_translation_source() -> String {
    "routes".to_string()
}

fn default_true() -> bool {
    true
}

/// Language configuration loaded at boot.
///
/// # Examples
///
/// ```
/// use locale_routes::LocaleConfig;
///
/// let config = LocaleConfig::from_json(r#"{
///     "languages": [
///         {"locale": "en", "name": "English", "default": true},
///         {"locale": "de-CH", "slug": "de", "fallback": "en"}
///     ]
/// }"#).unwrap();
///
/// let languages = config.build_registry().unwrap();
/// assert_eq!(languages.default_language().locale, "en");
/// assert_eq!(languages.slugs(), vec!["de", "en"]);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Area whose registry serves requests without an explicit area
    #[serde(default = "default_area")]
    pub default_area: String,

    /// Whether an unknown locale slug falls back to the default language
    #[serde(default = "default_true")]
    pub allow_fallback_to_default: bool,

    /// Source name for route segment translations
    #[serde(default = "default_translation_source")]
    pub translation_source: String,

    /// Configured languages, as raw attribute entries
    pub languages: Vec<serde_json::Value>,
}

impl LocaleConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The configured language entities, sorted by priority then locale.
    pub fn languages(&self) -> Result<Vec<Language>> {
        let factory = LanguageFactory::new();
        let mut languages = self
            .languages
            .iter()
            .map(|entry| factory.from_attributes(entry.clone()))
            .collect::<Result<Vec<_>>>()?;

        languages.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.locale.cmp(&b.locale)));

        Ok(languages)
    }

    /// Build the registry of the default area.
    pub fn build_registry(&self) -> Result<Languages> {
        Ok(self.build_area_languages()?.default_area().clone())
    }

    /// Build per-area registries from the configured languages.
    pub fn build_area_languages(&self) -> Result<AreaLanguages> {
        AreaLanguages::new(self.languages()?, self.default_area.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageError;

    #[test]
    fn test_defaults() {
        let config = LocaleConfig::from_json(r#"{"languages": [{"locale": "en"}]}"#).unwrap();

        assert_eq!(config.default_area, "default");
        assert!(config.allow_fallback_to_default);
        assert_eq!(config.translation_source, "routes");
    }

    #[test]
    fn test_build_registry_sorts_and_picks_default() {
        let config = LocaleConfig::from_json(
            r#"{
                "languages": [
                    {"locale": "fr", "order": 1},
                    {"locale": "en", "order": 3, "default": true},
                    {"locale": "de", "order": 2, "fallback": "en"}
                ]
            }"#,
        )
        .unwrap();

        let languages = config.build_registry().unwrap();
        assert_eq!(languages.locales(), vec!["en", "de", "fr"]);
        assert_eq!(languages.default_language().locale, "en");
        assert_eq!(languages.fallbacks().get("de"), Some(&"en".to_string()));
    }

    #[test]
    fn test_build_area_languages() {
        let config = LocaleConfig::from_json(
            r#"{
                "languages": [
                    {"locale": "en", "default": true},
                    {"locale": "de"},
                    {"locale": "en", "area": "admin", "default": true}
                ]
            }"#,
        )
        .unwrap();

        let areas = config.build_area_languages().unwrap();
        assert_eq!(areas.default_area().len(), 2);
        assert_eq!(areas.get("admin").unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_language_attribute_fails() {
        let config = LocaleConfig::from_json(
            r#"{"languages": [{"locale": "en", "colour": "red"}]}"#,
        )
        .unwrap();

        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, LanguageError::CreationFailed { .. }));
    }

    #[test]
    fn test_invalid_json_fails() {
        assert!(matches!(
            LocaleConfig::from_json("{").unwrap_err(),
            LanguageError::Json(_)
        ));
    }
}
