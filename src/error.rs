//! Error types for language and localization operations

use thiserror::Error;

/// Errors that can occur while building registries, creating language
/// entities or resolving the current language.
#[derive(Debug, Error)]
pub enum LanguageError {
    /// The request's locale slug matched no configured language and
    /// fallback to the default language was disabled.
    ///
    /// Recoverable: a default language always exists, so callers are
    /// expected to log and continue with the default (see
    /// [`PathLanguageResolver::resolve_soft`](crate::PathLanguageResolver::resolve_soft)).
    #[error("current language not resolved: {0}")]
    CurrentNotResolved(String),

    /// Creating a language entity from raw attributes failed.
    #[error("failed to create language: {reason}")]
    CreationFailed { reason: String },

    /// Two languages in the same registry share a slug.
    #[error("duplicate language slug: {0}")]
    DuplicateSlug(String),

    /// A registry cannot be built without languages.
    #[error("a language registry requires at least one language")]
    EmptyRegistry,

    /// No languages are configured for the requested area.
    #[error("no languages configured for area: {0}")]
    UnknownArea(String),

    /// JSON decode error (configuration or store rows).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (configuration files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
