//! Current-Language Resolution
//!
//! Decides, once per request, which configured language a request
//! addresses by inspecting the first URI path segment.

use crate::{LanguageContext, LanguageError, Languages, Result};

/// Resolves the current language for a request path.
///
/// Implementations run early in the request lifecycle, before anything
/// that depends on the current language is constructed.
pub trait LanguageResolver: Send + Sync {
    /// Resolve the current language from the request path.
    fn resolve(&self, path: &str, languages: &Languages) -> Result<LanguageContext>;
}

/// Resolves the current language from the first URI path segment.
///
/// A segment shorter than 2 or longer than 5 characters is not treated
/// as a locale slug at all, and a segment equal to the default language's
/// slug leaves the request on the default language so the default never
/// gets a duplicate prefixed route.
///
/// # Examples
///
/// ```
/// use locale_routes::{Language, Languages, LanguageResolver, PathLanguageResolver};
///
/// let languages = Languages::new(vec![
///     Language::new("en").as_default(),
///     Language::new("de"),
/// ]).unwrap();
///
/// let resolver = PathLanguageResolver::new();
///
/// let context = resolver.resolve("/de/checkout", &languages).unwrap();
/// assert_eq!(context.current_or(&languages).slug, "de");
///
/// let context = resolver.resolve("/checkout", &languages).unwrap();
/// assert_eq!(context.current_or(&languages).slug, "en");
/// ```
#[derive(Debug, Clone)]
pub struct PathLanguageResolver {
    allow_fallback_to_default: bool,
}

impl PathLanguageResolver {
    /// Create a resolver that falls back to the default language when
    /// the path carries an unknown locale slug.
    pub fn new() -> Self {
        Self {
            allow_fallback_to_default: true,
        }
    }

    /// Configure whether an unknown locale slug falls back to the
    /// default language or fails with
    /// [`LanguageError::CurrentNotResolved`].
    pub fn with_fallback_to_default(mut self, allow: bool) -> Self {
        self.allow_fallback_to_default = allow;
        self
    }

    /// Resolve, discarding a [`LanguageError::CurrentNotResolved`] error.
    ///
    /// Resolution failure never changes which language serves the
    /// request: the default always exists and applies. Failing hard is
    /// only useful for logging, so this logs the unknown slug and
    /// returns an unresolved context.
    pub fn resolve_soft(&self, path: &str, languages: &Languages) -> LanguageContext {
        match self.resolve(path, languages) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, path, "current language not resolved, using default");
                LanguageContext::new()
            }
        }
    }
}

impl Default for PathLanguageResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageResolver for PathLanguageResolver {
    fn resolve(&self, path: &str, languages: &Languages) -> Result<LanguageContext> {
        let candidate = first_segment(path);

        let len = candidate.chars().count();
        if !(2..=5).contains(&len) {
            return Ok(LanguageContext::new());
        }

        // The default language is served unprefixed; its slug is not a
        // locale route.
        if candidate == languages.default_language().slug {
            return Ok(LanguageContext::new());
        }

        if !self.allow_fallback_to_default && languages.get(candidate).is_none() {
            return Err(LanguageError::CurrentNotResolved(candidate.to_string()));
        }

        let language = languages.get_or_default(candidate);
        tracing::debug!(locale = %language.locale, slug = candidate, "resolved current language");

        Ok(LanguageContext::with_language(language.clone()))
    }
}

/// The first segment of a URI path, without leading slashes.
fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/')
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default()
}
