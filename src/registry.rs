//! Language Registries
//!
//! Ordered, immutable collections of [`Language`] entities plus the
//! request-scoped [`LanguageContext`] carrying the resolved current
//! language. Registries never change after construction; what varies per
//! request lives in the context value threaded to consumers.

use crate::{Language, LanguageError, Result};
use std::collections::BTreeMap;

/// An ordered, immutable collection of configured languages.
///
/// Entries keep the order they were given in; stores and the configuration
/// loader sort by priority (descending) then locale before constructing a
/// registry. Exactly one entry acts as the default: the first one flagged
/// as default, or the first entry when none is flagged.
///
/// # Examples
///
/// ```
/// use locale_routes::{Language, Languages};
///
/// let languages = Languages::new(vec![
///     Language::new("en").as_default(),
///     Language::new("de").with_fallback("en"),
/// ]).unwrap();
///
/// assert_eq!(languages.default_language().slug, "en");
/// assert_eq!(languages.slugs(), vec!["en", "de"]);
/// assert_eq!(languages.get("de").unwrap().locale, "de");
/// assert!(languages.get("fr").is_none());
/// assert_eq!(languages.get_or_default("fr").slug, "en");
/// ```
#[derive(Debug, Clone)]
pub struct Languages {
    entries: Vec<Language>,
    default_index: usize,
}

impl Languages {
    /// Build a registry from languages in their final order.
    ///
    /// Fails with [`LanguageError::EmptyRegistry`] when no languages are
    /// given and [`LanguageError::DuplicateSlug`] when two entries share
    /// a slug.
    pub fn new(entries: Vec<Language>) -> Result<Self> {
        if entries.is_empty() {
            return Err(LanguageError::EmptyRegistry);
        }

        for (i, language) in entries.iter().enumerate() {
            if entries[..i].iter().any(|l| l.slug == language.slug) {
                return Err(LanguageError::DuplicateSlug(language.slug.clone()));
            }
        }

        let default_index = entries.iter().position(|l| l.default).unwrap_or(0);

        Ok(Self {
            entries,
            default_index,
        })
    }

    /// Build a registry after sorting by priority (descending) then
    /// locale (ascending), the order stores deliver languages in.
    pub fn sorted(mut entries: Vec<Language>) -> Result<Self> {
        entries.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.locale.cmp(&b.locale)));
        Self::new(entries)
    }

    /// Registry construction from entries of an already-validated registry.
    pub(crate) fn of(entries: Vec<Language>) -> Self {
        let default_index = entries.iter().position(|l| l.default).unwrap_or(0);
        Self {
            entries,
            default_index,
        }
    }

    /// All languages in registry order.
    pub fn all(&self) -> &[Language] {
        &self.entries
    }

    /// Number of configured languages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty (never true for constructed registries).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a language by slug or locale, without fallback.
    pub fn get(&self, key: &str) -> Option<&Language> {
        self.entries.iter().find(|l| l.matches(key))
    }

    /// Look up a language by slug or locale, falling back to the default.
    pub fn get_or_default(&self, key: &str) -> &Language {
        self.get(key).unwrap_or_else(|| self.default_language())
    }

    /// The default language of this registry.
    pub fn default_language(&self) -> &Language {
        &self.entries[self.default_index]
    }

    /// The languages restricted to the given domain, followed by all
    /// shared (domain-less) languages.
    ///
    /// The domain languages come first so a domain-specific default wins
    /// over a shared one. `None` when no language matches the domain and
    /// no shared language exists, so a returned registry always has a
    /// default.
    pub fn for_domain(&self, domain: &str) -> Option<Self> {
        let mut entries: Vec<Language> = self
            .entries
            .iter()
            .filter(|l| l.domain.as_deref() == Some(domain))
            .cloned()
            .collect();
        entries.extend(self.entries.iter().filter(|l| l.domain.is_none()).cloned());

        if entries.is_empty() {
            return None;
        }
        Some(Self::of(entries))
    }

    /// The distinct domains declared by languages, in registry order.
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = Vec::new();
        for language in &self.entries {
            if let Some(domain) = language.domain.as_deref() {
                if !domains.contains(&domain) {
                    domains.push(domain);
                }
            }
        }
        domains
    }

    /// All slugs in registry order.
    pub fn slugs(&self) -> Vec<String> {
        self.entries.iter().map(|l| l.slug.clone()).collect()
    }

    /// All locales in registry order.
    pub fn locales(&self) -> Vec<String> {
        self.entries.iter().map(|l| l.locale.clone()).collect()
    }

    /// Map of slug to fallback slug for languages declaring a fallback
    /// that resolves to a configured language.
    pub fn fallbacks(&self) -> BTreeMap<String, String> {
        let mut fallbacks = BTreeMap::new();
        for language in &self.entries {
            if let Some(fallback) = language.fallback.as_deref() {
                if let Some(target) = self.get(fallback) {
                    fallbacks.insert(language.slug.clone(), target.slug.clone());
                }
            }
        }
        fallbacks
    }
}

/// Registries partitioned by application area.
///
/// Built once at startup from the flat language list a store delivers;
/// each area gets its own registry with its own default language.
#[derive(Debug, Clone)]
pub struct AreaLanguages {
    areas: BTreeMap<String, Languages>,
    default_area: String,
}

impl AreaLanguages {
    /// Group languages by area and build one registry per area.
    ///
    /// The default area must be present.
    pub fn new(languages: Vec<Language>, default_area: impl Into<String>) -> Result<Self> {
        let default_area = default_area.into();
        let mut grouped: BTreeMap<String, Vec<Language>> = BTreeMap::new();

        for language in languages {
            grouped.entry(language.area.clone()).or_default().push(language);
        }

        let mut areas = BTreeMap::new();
        for (area, entries) in grouped {
            areas.insert(area, Languages::new(entries)?);
        }

        if !areas.contains_key(&default_area) {
            return Err(LanguageError::UnknownArea(default_area));
        }

        Ok(Self {
            areas,
            default_area,
        })
    }

    /// The registry for an area, if configured.
    pub fn get(&self, area: &str) -> Option<&Languages> {
        self.areas.get(area)
    }

    /// The registry of the default area.
    pub fn default_area(&self) -> &Languages {
        &self.areas[&self.default_area]
    }

    /// The configured area names.
    pub fn areas(&self) -> impl Iterator<Item = &str> {
        self.areas.keys().map(|a| a.as_str())
    }
}

/// Request-scoped holder of the resolved current language.
///
/// A fresh context is unresolved; the resolver fills it in once per
/// request. Consumers read the current language through
/// [`current_or`](LanguageContext::current_or), which yields the
/// registry's default while unresolved.
#[derive(Debug, Clone, Default)]
pub struct LanguageContext {
    current: Option<Language>,
}

impl LanguageContext {
    /// Create an unresolved context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying the given current language.
    pub fn with_language(language: Language) -> Self {
        Self {
            current: Some(language),
        }
    }

    /// The explicitly resolved language, if any.
    pub fn current(&self) -> Option<&Language> {
        self.current.as_ref()
    }

    /// The current language, or the registry default while unresolved.
    pub fn current_or<'a>(&'a self, languages: &'a Languages) -> &'a Language {
        self.current
            .as_ref()
            .unwrap_or_else(|| languages.default_language())
    }

    /// Whether a language was explicitly resolved.
    pub fn is_resolved(&self) -> bool {
        self.current.is_some()
    }
}
