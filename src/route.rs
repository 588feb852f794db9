//! Route Attachment
//!
//! The narrow capability interface routes expose to the localizer, plus a
//! concrete [`Route`] carrier used for reverse URL generation.
//!
//! A route is registered with a URI template using `{?locale}` for the
//! optional locale prefix and `{name}` for translatable segments:
//!
//! ```text
//! {?locale}/{checkout}/{payment}
//! ```

use std::collections::BTreeMap;

/// The shape of a route being localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// A single route
    Route,
    /// A group of routes sharing a prefix
    Group,
    /// A resource route with index/create/edit sub-actions
    Resource,
}

/// Localization metadata registered on a route.
///
/// Setters replace previous values, so localizing a route twice yields
/// the same state as localizing it once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteLocales {
    locales: Vec<String>,
    locale_omit: Option<String>,
    locale_fallbacks: BTreeMap<String, String>,
    locale: Option<String>,
    /// segment name -> (slug -> translated text)
    translations: BTreeMap<String, BTreeMap<String, String>>,
    /// sub-action name -> (slug -> translated text)
    action_translations: BTreeMap<String, BTreeMap<String, String>>,
}

impl RouteLocales {
    /// Accepted locale slugs, in registry order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The slug omitted from generated URLs (the default language).
    pub fn locale_omit(&self) -> Option<&str> {
        self.locale_omit.as_deref()
    }

    /// The slug-to-fallback-slug substitution map.
    pub fn locale_fallbacks(&self) -> &BTreeMap<String, String> {
        &self.locale_fallbacks
    }

    /// The active locale slug for the current request.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The per-locale translations attached for a segment.
    pub fn translation(&self, segment: &str) -> Option<&BTreeMap<String, String>> {
        self.translations.get(segment)
    }

    /// The per-locale translations attached for a resource sub-action.
    pub fn action_translation(&self, action: &str) -> Option<&BTreeMap<String, String>> {
        self.action_translations.get(action)
    }

    fn translated_text<'a>(&'a self, segment: &'a str, slug: &str) -> &'a str {
        self.translations
            .get(segment)
            .and_then(|t| t.get(slug))
            .map(|s| s.as_str())
            .unwrap_or(segment)
    }
}

/// The capability interface the localizer works against.
///
/// Any route-like object (single route, group, resource) that can carry
/// locale metadata implements this.
pub trait LocaleAttachment {
    /// The shape of this route.
    fn kind(&self) -> RouteKind;

    /// Register the accepted locale slugs, in order.
    fn set_locales(&mut self, slugs: Vec<String>);

    /// Register the slug omitted from generated URLs.
    fn set_locale_omit(&mut self, slug: &str);

    /// Register the slug-to-fallback-slug substitution map.
    fn set_locale_fallbacks(&mut self, fallbacks: BTreeMap<String, String>);

    /// Register the active locale slug for the current request.
    fn set_locale(&mut self, slug: &str);

    /// Attach per-locale translated values for a named segment,
    /// optionally scoped to a resource sub-action.
    fn attach_translation(
        &mut self,
        segment: &str,
        translated: BTreeMap<String, String>,
        action: Option<&str>,
    );

    /// Scope a block of registration to a specific domain.
    fn scope_domain(&mut self, domain: &str, scope: &mut dyn FnMut(&mut dyn LocaleAttachment));
}

/// A named route with a URI template and its localization metadata.
///
/// # Examples
///
/// ```
/// use locale_routes::{LocaleAttachment, Route, RouteKind};
///
/// let route = Route::new("checkout", "{?locale}/{checkout}");
/// assert_eq!(route.kind(), RouteKind::Route);
/// assert_eq!(route.name(), "checkout");
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    uri: String,
    kind: RouteKind,
    locales: RouteLocales,
    domained: Vec<(String, RouteLocales)>,
}

impl Route {
    /// Create a single route.
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::with_kind(name, uri, RouteKind::Route)
    }

    /// Create a route group.
    pub fn group(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::with_kind(name, uri, RouteKind::Group)
    }

    /// Create a resource route.
    pub fn resource(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::with_kind(name, uri, RouteKind::Resource)
    }

    fn with_kind(name: impl Into<String>, uri: impl Into<String>, kind: RouteKind) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            kind,
            locales: RouteLocales::default(),
            domained: Vec::new(),
        }
    }

    /// The route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The URI template.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The localization metadata registered outside any domain scope.
    pub fn localization(&self) -> &RouteLocales {
        &self.locales
    }

    /// The localization metadata registered for a domain.
    pub fn domain_localization(&self, domain: &str) -> Option<&RouteLocales> {
        self.domained
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, locales)| locales)
    }

    /// The domains this route was scoped to, in registration order.
    pub fn scoped_domains(&self) -> Vec<&str> {
        self.domained.iter().map(|(d, _)| d.as_str()).collect()
    }

    /// The localized URI path for one locale slug, without leading slash.
    ///
    /// `{?locale}` renders as the slug unless it is the omitted default;
    /// `{name}` renders as the attached translation for the slug, or the
    /// raw segment name when none is attached.
    pub fn localized_path(&self, slug: &str) -> String {
        localized_path(&self.uri, &self.locales, slug)
    }

    /// Generated URLs per locale slug, in registered locale order.
    ///
    /// # Examples
    ///
    /// ```
    /// use locale_routes::{LocaleAttachment, Route};
    ///
    /// let mut route = Route::new("foo", "{?locale}/foo");
    /// route.set_locales(vec!["en".into(), "de".into()]);
    /// route.set_locale_omit("en");
    ///
    /// assert_eq!(route.translated_urls("https://example.com"), vec![
    ///     ("en".to_string(), "https://example.com/foo".to_string()),
    ///     ("de".to_string(), "https://example.com/de/foo".to_string()),
    /// ]);
    /// ```
    pub fn translated_urls(&self, base_url: &str) -> Vec<(String, String)> {
        translated_urls(base_url, &self.uri, &self.locales)
    }

    /// Generated URLs per locale slug for one domain scope.
    pub fn domain_translated_urls(&self, domain: &str) -> Option<Vec<(String, String)>> {
        self.domain_localization(domain)
            .map(|locales| translated_urls(&format!("https://{domain}"), &self.uri, locales))
    }

    /// The canonical (default-locale) URL for each domain scope.
    pub fn domained_urls(&self) -> Vec<(String, String)> {
        self.domained
            .iter()
            .map(|(domain, locales)| {
                let slug = locales
                    .locale_omit
                    .clone()
                    .or_else(|| locales.locales.first().cloned())
                    .unwrap_or_default();
                let base = format!("https://{domain}");
                (domain.clone(), join_url(&base, &localized_path(&self.uri, locales, &slug)))
            })
            .collect()
    }

    /// Generated URLs per locale slug for a resource sub-action.
    ///
    /// The action path extends the resource path with the given params
    /// and the per-locale translated action text (e.g. `/products/5/edit`).
    pub fn action_translated_urls(
        &self,
        base_url: &str,
        action: &str,
        params: &[&str],
    ) -> Vec<(String, String)> {
        self.locales
            .locales
            .iter()
            .map(|slug| {
                let mut path = localized_path(&self.uri, &self.locales, slug);
                for param in params {
                    path = join_path(&path, param);
                }
                let text = self
                    .locales
                    .action_translations
                    .get(action)
                    .and_then(|t| t.get(slug))
                    .map(|s| s.as_str())
                    .unwrap_or(action);
                path = join_path(&path, text);
                (slug.clone(), join_url(base_url, &path))
            })
            .collect()
    }
}

impl LocaleAttachment for Route {
    fn kind(&self) -> RouteKind {
        self.kind
    }

    fn set_locales(&mut self, slugs: Vec<String>) {
        self.locales.locales = slugs;
    }

    fn set_locale_omit(&mut self, slug: &str) {
        self.locales.locale_omit = Some(slug.to_string());
    }

    fn set_locale_fallbacks(&mut self, fallbacks: BTreeMap<String, String>) {
        self.locales.locale_fallbacks = fallbacks;
    }

    fn set_locale(&mut self, slug: &str) {
        self.locales.locale = Some(slug.to_string());
    }

    fn attach_translation(
        &mut self,
        segment: &str,
        translated: BTreeMap<String, String>,
        action: Option<&str>,
    ) {
        attach(&mut self.locales, segment, translated, action);
    }

    fn scope_domain(&mut self, domain: &str, scope: &mut dyn FnMut(&mut dyn LocaleAttachment)) {
        let index = match self.domained.iter().position(|(d, _)| d == domain) {
            Some(index) => index,
            None => {
                self.domained
                    .push((domain.to_string(), RouteLocales::default()));
                self.domained.len() - 1
            }
        };

        let mut scoped = DomainScope {
            kind: self.kind,
            locales: &mut self.domained[index].1,
        };
        scope(&mut scoped);
    }
}

/// A route view whose registrations land on one domain's metadata.
struct DomainScope<'a> {
    kind: RouteKind,
    locales: &'a mut RouteLocales,
}

impl LocaleAttachment for DomainScope<'_> {
    fn kind(&self) -> RouteKind {
        self.kind
    }

    fn set_locales(&mut self, slugs: Vec<String>) {
        self.locales.locales = slugs;
    }

    fn set_locale_omit(&mut self, slug: &str) {
        self.locales.locale_omit = Some(slug.to_string());
    }

    fn set_locale_fallbacks(&mut self, fallbacks: BTreeMap<String, String>) {
        self.locales.locale_fallbacks = fallbacks;
    }

    fn set_locale(&mut self, slug: &str) {
        self.locales.locale = Some(slug.to_string());
    }

    fn attach_translation(
        &mut self,
        segment: &str,
        translated: BTreeMap<String, String>,
        action: Option<&str>,
    ) {
        attach(self.locales, segment, translated, action);
    }

    fn scope_domain(&mut self, _domain: &str, scope: &mut dyn FnMut(&mut dyn LocaleAttachment)) {
        // Already scoped; nested scoping collapses onto this domain.
        scope(self);
    }
}

fn attach(
    locales: &mut RouteLocales,
    segment: &str,
    translated: BTreeMap<String, String>,
    action: Option<&str>,
) {
    match action {
        Some(action) => {
            locales
                .action_translations
                .insert(action.to_string(), translated);
        }
        None => {
            locales.translations.insert(segment.to_string(), translated);
        }
    }
}

fn localized_path(uri: &str, locales: &RouteLocales, slug: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for segment in uri.split('/').filter(|s| !s.is_empty()) {
        if segment == "{?locale}" {
            if locales.locale_omit.as_deref() != Some(slug) {
                parts.push(slug.to_string());
            }
        } else if segment == "{locale}" {
            parts.push(slug.to_string());
        } else if let Some(name) = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
        {
            parts.push(locales.translated_text(name, slug).to_string());
        } else {
            parts.push(segment.to_string());
        }
    }

    parts.join("/")
}

fn translated_urls(base_url: &str, uri: &str, locales: &RouteLocales) -> Vec<(String, String)> {
    locales
        .locales
        .iter()
        .map(|slug| (slug.clone(), join_url(base_url, &localized_path(uri, locales, slug))))
        .collect()
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

fn join_path(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}/{segment}")
    }
}
