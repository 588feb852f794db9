//! Locale-Aware Routing Support
//!
//! Multi-language support for web applications built around three pieces:
//!
//! - **Language Registry**: ordered, immutable [`Languages`] built from
//!   configuration or a [`LanguageStore`], partitioned by area and domain
//! - **Current-Language Resolution**: per-request decision of which
//!   configured language a request addresses, from the first URI segment
//! - **Route Localization**: route-registration-time computation of
//!   per-locale URI variants with translated segments
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use locale_routes::{
//!     Language, Languages, LanguageResolver, PathLanguageResolver,
//!     Route, RouteLocalizer, Translations,
//! };
//!
//! let languages = Arc::new(Languages::new(vec![
//!     Language::new("en").as_default(),
//!     Language::new("de").with_fallback("en"),
//! ]).unwrap());
//!
//! // Once per request, early: resolve the current language.
//! let resolver = PathLanguageResolver::new();
//! let context = resolver.resolve("/de/kasse", &languages).unwrap();
//! assert_eq!(context.current_or(&languages).slug, "de");
//!
//! // At route registration: localize routes for every language.
//! let localizer = RouteLocalizer::new(Arc::clone(&languages))
//!     .with_translator(Arc::new(
//!         Translations::new().with_resource("routes", "de", [("checkout", "kasse")]),
//!     ));
//!
//! let mut route = Route::new("checkout", "{?locale}/{checkout}");
//! localizer.localize_route(&mut route, &["checkout"]);
//!
//! assert_eq!(route.translated_urls("https://example.com"), vec![
//!     ("en".to_string(), "https://example.com/checkout".to_string()),
//!     ("de".to_string(), "https://example.com/de/kasse".to_string()),
//! ]);
//! ```
//!
//! # Domains
//!
//! Languages restricted to a domain partition the registry: each domain
//! gets its own registry made of its languages plus all shared
//! (domain-less) ones, and routes are localized per domain scope.
//!
//! # Failure Semantics
//!
//! Resolution failure is fail-soft by design: a default language always
//! exists and must always be serviceable, so
//! [`LanguageError::CurrentNotResolved`] only matters for logging. Entity
//! creation errors propagate to the application boundary.

mod config;
mod error;
mod language;
mod localizer;
mod registry;
mod resolver;
mod route;
mod store;

pub use config::LocaleConfig;
pub use error::LanguageError;
pub use language::{slugify, Language, LanguageFactory};
pub use localizer::{RouteLocalizer, Translations, Translator};
pub use registry::{AreaLanguages, LanguageContext, Languages};
pub use resolver::{LanguageResolver, PathLanguageResolver};
pub use route::{LocaleAttachment, Route, RouteKind, RouteLocales};
pub use store::{InMemoryLanguageStore, LanguageStore};

/// Result type for language operations
pub type Result<T> = std::result::Result<T, LanguageError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        slugify, Language, LanguageContext, LanguageError, LanguageResolver, Languages,
        LocaleAttachment, PathLanguageResolver, Result, Route, RouteKind, RouteLocalizer,
        Translations, Translator,
    };
}
