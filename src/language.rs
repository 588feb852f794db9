//! Language Entity
//!
//! Provides the immutable [`Language`] value, the attribute-map factory used
//! by stores, and the [`slugify`] helper for URL-safe segments.

use crate::{LanguageError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable, configured language.
///
/// The `slug` is the URI path segment identifying the language
/// (e.g. `en-us` for locale `en-US`); it is derived from the locale
/// when not set explicitly.
///
/// # Examples
///
/// ```
/// use locale_routes::Language;
///
/// let de = Language::new("de-CH")
///     .with_slug("de")
///     .with_fallback("en");
///
/// assert_eq!(de.locale, "de-CH");
/// assert_eq!(de.slug, "de");
/// assert_eq!(de.iso, "de");
/// assert_eq!(de.region.as_deref(), Some("CH"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Numeric identifier (storage primary key)
    pub id: i64,

    /// Canonical locale identifier (e.g. `en-US`)
    pub locale: String,

    /// Two-letter language code derived from the locale
    pub iso: String,

    /// Optional region code derived from the locale (e.g. `US`)
    pub region: Option<String>,

    /// Human-readable name (e.g. `English`)
    pub name: String,

    /// URI segment identifier, unique within a registry
    pub slug: String,

    /// Directory name for language resources
    pub directory: String,

    /// Text direction, `ltr` or `rtl`
    pub direction: String,

    /// Application area this language belongs to (e.g. `default`, `admin`)
    pub area: String,

    /// Optional host name restricting this language to one domain
    pub domain: Option<String>,

    /// Optional absolute base URL for this language
    pub url: Option<String>,

    /// Optional locale of another configured language to defer to
    pub fallback: Option<String>,

    /// Whether this is the default language of its registry
    pub default: bool,

    /// Whether this language is active
    pub active: bool,

    /// Sort priority; higher orders first, ties broken by locale
    pub order: i64,
}

impl Language {
    /// Create a new language for the given locale.
    ///
    /// The slug, iso and region are derived from the locale; everything
    /// else takes its documented default.
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        let slug = derive_slug(&locale);
        let (iso, region) = split_locale(&locale);

        Self {
            id: 0,
            locale,
            iso,
            region,
            name: String::new(),
            directory: slug.clone(),
            slug,
            direction: "ltr".to_string(),
            area: "default".to_string(),
            domain: None,
            url: None,
            fallback: None,
            default: false,
            active: true,
            order: 0,
        }
    }

    /// Set the slug used as URI segment.
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set the human-readable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restrict this language to a domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the fallback locale.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Set the application area.
    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = area.into();
        self
    }

    /// Set the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Mark this language as the default of its registry.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Set the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the sort priority.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Set the numeric identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Whether this language matches the given key (slug, or locale
    /// compared case-insensitively).
    pub fn matches(&self, key: &str) -> bool {
        self.slug == key || self.locale.eq_ignore_ascii_case(key)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.locale)
    }
}

/// Raw attributes as read from a store row or configuration entry.
///
/// Unknown keys are rejected so storage schema drift surfaces as an error
/// instead of silently dropping data.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct LanguageAttributes {
    id: Option<i64>,
    locale: String,
    iso: Option<String>,
    region: Option<String>,
    name: Option<String>,
    slug: Option<String>,
    directory: Option<String>,
    direction: Option<String>,
    area: Option<String>,
    domain: Option<String>,
    url: Option<String>,
    fallback: Option<String>,
    default: Option<bool>,
    active: Option<bool>,
    order: Option<i64>,
}

/// Creates [`Language`] entities from raw attribute maps.
///
/// Used by stores and the configuration loader; any attribute the schema
/// does not know fails with [`LanguageError::CreationFailed`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageFactory;

impl LanguageFactory {
    /// Create a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Create a language from a raw JSON attribute map.
    ///
    /// # Examples
    ///
    /// ```
    /// use locale_routes::LanguageFactory;
    /// use serde_json::json;
    ///
    /// let factory = LanguageFactory::new();
    /// let language = factory
    ///     .from_attributes(json!({"locale": "de", "name": "Deutsch"}))
    ///     .unwrap();
    ///
    /// assert_eq!(language.locale, "de");
    /// assert_eq!(language.name, "Deutsch");
    ///
    /// assert!(factory.from_attributes(json!({"locale": "de", "bogus": 1})).is_err());
    /// ```
    pub fn from_attributes(&self, attributes: serde_json::Value) -> Result<Language> {
        let attrs: LanguageAttributes = serde_json::from_value(attributes)
            .map_err(|e| LanguageError::CreationFailed {
                reason: e.to_string(),
            })?;

        if attrs.locale.is_empty() {
            return Err(LanguageError::CreationFailed {
                reason: "missing locale".to_string(),
            });
        }

        let mut language = Language::new(attrs.locale);
        if let Some(id) = attrs.id {
            language.id = id;
        }
        if let Some(iso) = attrs.iso {
            language.iso = iso;
        }
        if let Some(region) = attrs.region {
            language.region = Some(region);
        }
        if let Some(name) = attrs.name {
            language.name = name;
        }
        if let Some(slug) = attrs.slug {
            language.directory = slug.clone();
            language.slug = slug;
        }
        if let Some(directory) = attrs.directory {
            language.directory = directory;
        }
        if let Some(direction) = attrs.direction {
            language.direction = direction;
        }
        if let Some(area) = attrs.area {
            language.area = area;
        }
        language.domain = attrs.domain;
        language.url = attrs.url;
        language.fallback = attrs.fallback;
        if let Some(default) = attrs.default {
            language.default = default;
        }
        if let Some(active) = attrs.active {
            language.active = active;
        }
        if let Some(order) = attrs.order {
            language.order = order;
        }

        Ok(language)
    }
}

/// Derive a slug from a locale: lower-cased with `_` normalized to `-`.
fn derive_slug(locale: &str) -> String {
    locale.to_lowercase().replace('_', "-")
}

/// Split a locale into its language code and optional region.
fn split_locale(locale: &str) -> (String, Option<String>) {
    let mut parts = locale.splitn(2, |c| c == '-' || c == '_');
    let iso = parts.next().unwrap_or_default().to_lowercase();
    let region = parts
        .next()
        .filter(|r| !r.is_empty())
        .map(|r| r.to_uppercase());
    (iso, region)
}

/// Convert text into a URL-safe slug.
///
/// Lower-cases, collapses runs of non-alphanumeric characters into a
/// single `-` and trims leading/trailing separators.
///
/// # Examples
///
/// ```
/// use locale_routes::slugify;
///
/// assert_eq!(slugify("die Kasse"), "die-kasse");
/// assert_eq!(slugify("check  Out!"), "check-out");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }

    slug
}
