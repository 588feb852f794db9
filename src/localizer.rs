//! Route Localization
//!
//! Produces, at route-registration time, per-locale URI variants for
//! every configured language and domain: translated segments, the
//! accepted locale list, the omitted default slug and the fallback map.

use crate::language::slugify;
use crate::route::{LocaleAttachment, RouteKind};
use crate::{LanguageContext, Languages};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Translation lookup used for route URI segments.
///
/// Returns `None` when no translation exists for the message; the
/// localizer then uses the raw segment text. Lookups are scoped by a
/// source name so route translations do not collide with other
/// translation resources.
pub trait Translator: Send + Sync {
    /// Translate a message for a locale within a source.
    fn translate(&self, message: &str, locale: &str, source: &str) -> Option<String>;
}

/// In-memory translation resources, keyed by source and locale.
///
/// # Examples
///
/// ```
/// use locale_routes::{Translations, Translator};
///
/// let translations = Translations::new()
///     .with_resource("routes", "de", [("checkout", "kasse")]);
///
/// assert_eq!(
///     translations.translate("checkout", "de", "routes"),
///     Some("kasse".to_string())
/// );
/// assert_eq!(translations.translate("checkout", "fr", "routes"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translations {
    resources: BTreeMap<(String, String), BTreeMap<String, String>>,
}

impl Translations {
    /// Create an empty set of resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation resource for a source and locale.
    pub fn with_resource<K, V>(
        mut self,
        source: impl Into<String>,
        locale: impl Into<String>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let resource = self
            .resources
            .entry((source.into(), locale.into()))
            .or_default();
        for (key, value) in entries {
            resource.insert(key.into(), value.into());
        }
        self
    }
}

impl Translator for Translations {
    fn translate(&self, message: &str, locale: &str, source: &str) -> Option<String> {
        self.resources
            .get(&(source.to_string(), locale.to_string()))
            .and_then(|r| r.get(message))
            .cloned()
    }
}

/// Localizes routes against a language registry, partitioned by domain
/// when domain-restricted languages are configured.
///
/// Runs at route-registration time, not per request; the domain
/// partition is computed once per localizer instance and reused.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use locale_routes::{Language, Languages, Route, RouteLocalizer, Translations};
///
/// let languages = Arc::new(Languages::new(vec![
///     Language::new("en").as_default(),
///     Language::new("de").with_fallback("en"),
/// ]).unwrap());
///
/// let localizer = RouteLocalizer::new(languages)
///     .with_translator(Arc::new(
///         Translations::new().with_resource("routes", "de", [("checkout", "kasse")]),
///     ));
///
/// let mut route = Route::new("checkout", "{?locale}/{checkout}");
/// localizer.localize_route(&mut route, &["checkout"]);
///
/// assert_eq!(route.translated_urls("https://example.com"), vec![
///     ("en".to_string(), "https://example.com/checkout".to_string()),
///     ("de".to_string(), "https://example.com/de/kasse".to_string()),
/// ]);
/// ```
pub struct RouteLocalizer {
    languages: Arc<Languages>,
    translator: Option<Arc<dyn Translator>>,
    translation_source: String,
    domained: OnceCell<Vec<(String, Languages)>>,
}

impl RouteLocalizer {
    /// Create a localizer over the given registry.
    pub fn new(languages: Arc<Languages>) -> Self {
        Self {
            languages,
            translator: None,
            translation_source: "routes".to_string(),
            domained: OnceCell::new(),
        }
    }

    /// Set the translator used for URI segments.
    ///
    /// Without a translator, segments are attached verbatim.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Set the translation source name (default `routes`).
    pub fn with_translation_source(mut self, source: impl Into<String>) -> Self {
        self.translation_source = source.into();
        self
    }

    /// The registry this localizer works over.
    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    /// Localize a route for every configured language and domain, with
    /// the default language as the active locale.
    pub fn localize_route(&self, route: &mut dyn LocaleAttachment, uri_segments: &[&str]) {
        self.localize_route_in(&LanguageContext::new(), route, uri_segments);
    }

    /// Localize a route using the given request context for the active
    /// locale.
    pub fn localize_route_in(
        &self,
        context: &LanguageContext,
        route: &mut dyn LocaleAttachment,
        uri_segments: &[&str],
    ) {
        let domained = self.domained_languages();

        if domained.is_empty() {
            self.localizing_route(route, &self.languages, context);
            self.translate_route(route, uri_segments);
            return;
        }

        for (domain, languages) in domained {
            tracing::debug!(domain = %domain, "localizing route for domain");
            route.scope_domain(domain, &mut |scoped| {
                self.localizing_route(scoped, languages, context);
                self.translate_route(scoped, uri_segments);
            });
        }
    }

    /// Register locale metadata on the route from one registry.
    fn localizing_route(
        &self,
        route: &mut dyn LocaleAttachment,
        languages: &Languages,
        context: &LanguageContext,
    ) {
        let current = context.current_or(languages);

        route.set_locales(languages.slugs());
        route.set_locale_omit(&languages.default_language().slug);
        route.set_locale_fallbacks(self.languages.fallbacks());
        route.set_locale(&current.slug);
    }

    /// Attach per-locale translations for the given URI segments.
    ///
    /// Segments always translate across the full registry; a compound
    /// `"name.action"` segment on a resource route scopes the
    /// translation to that sub-action.
    fn translate_route(&self, route: &mut dyn LocaleAttachment, uri_segments: &[&str]) {
        for uri_segment in uri_segments {
            let (segment, action) = if route.kind() == RouteKind::Resource {
                match uri_segment.split_once('.') {
                    Some((segment, action)) => (segment, Some(action)),
                    None => (*uri_segment, None),
                }
            } else {
                (*uri_segment, None)
            };

            let mut translated = BTreeMap::new();
            for language in self.languages.all() {
                translated.insert(language.slug.clone(), self.translate(segment, &language.locale));
            }

            route.attach_translation(segment, translated, action);
        }
    }

    /// The segment text for one locale: the translation when one exists,
    /// the raw segment otherwise, slugged either way. Without a
    /// translator, segments are attached verbatim.
    fn translate(&self, segment: &str, locale: &str) -> String {
        match &self.translator {
            None => segment.to_string(),
            Some(translator) => {
                let text = translator
                    .translate(segment, locale, &self.translation_source)
                    .unwrap_or_else(|| segment.to_string());
                slugify(&text)
            }
        }
    }

    /// Registries per domain: that domain's languages plus all shared
    /// ones. Built on first use, cached for the localizer's lifetime.
    fn domained_languages(&self) -> &[(String, Languages)] {
        self.domained
            .get_or_init(|| {
                self.languages
                    .domains()
                    .into_iter()
                    .filter_map(|domain| {
                        let languages = self.languages.for_domain(domain)?;
                        Some((domain.to_string(), languages))
                    })
                    .collect()
            })
            .as_slice()
    }
}
