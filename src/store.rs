//! Language Persistence
//!
//! The store seam supplying configured languages at application start.
//! Implement [`LanguageStore`] against your database; the bundled
//! [`InMemoryLanguageStore`] is the default and carries the bootstrap
//! language, since at least a default language must exist for each area.

use crate::{Language, LanguageFactory, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;

/// Supplies the ordered list of configured languages.
#[async_trait]
pub trait LanguageStore: Send + Sync {
    /// All languages, ordered by priority (descending) then locale.
    async fn find_all(&self) -> Result<Vec<Language>>;

    /// One language by locale, if configured.
    async fn find_by_locale(&self, locale: &str) -> Result<Option<Language>>;
}

/// In-memory language store over raw attribute rows.
///
/// Rows go through [`LanguageFactory`], so schema drift surfaces as
/// [`LanguageError::CreationFailed`](crate::LanguageError::CreationFailed)
/// exactly as it would from a database-backed store.
///
/// # Examples
///
/// ```
/// use locale_routes::InMemoryLanguageStore;
/// use serde_json::json;
///
/// let store = InMemoryLanguageStore::bootstrap();
/// store.insert(json!({"locale": "de-CH", "slug": "de", "fallback": "en"}));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLanguageStore {
    rows: RwLock<Vec<serde_json::Value>>,
    factory: LanguageFactory,
}

impl InMemoryLanguageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the bootstrap language:
    /// English, default, id 1.
    pub fn bootstrap() -> Self {
        let store = Self::new();
        store.insert(json!({
            "id": 1,
            "locale": "en",
            "name": "English",
            "default": true,
        }));
        store
    }

    /// Add a raw attribute row.
    pub fn insert(&self, row: serde_json::Value) {
        self.rows.write().push(row);
    }
}

#[async_trait]
impl LanguageStore for InMemoryLanguageStore {
    async fn find_all(&self) -> Result<Vec<Language>> {
        let rows = self.rows.read().clone();

        let mut languages = rows
            .into_iter()
            .map(|row| self.factory.from_attributes(row))
            .collect::<Result<Vec<_>>>()?;

        languages.sort_by(|a, b| b.order.cmp(&a.order).then_with(|| a.locale.cmp(&b.locale)));

        Ok(languages)
    }

    async fn find_by_locale(&self, locale: &str) -> Result<Option<Language>> {
        let languages = self.find_all().await?;
        Ok(languages.into_iter().find(|l| l.matches(locale)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LanguageError;

    #[tokio::test]
    async fn test_bootstrap_store_has_default_english() {
        let store = InMemoryLanguageStore::bootstrap();
        let languages = store.find_all().await.unwrap();

        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].locale, "en");
        assert_eq!(languages[0].name, "English");
        assert_eq!(languages[0].id, 1);
        assert!(languages[0].default);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_priority_then_locale() {
        let store = InMemoryLanguageStore::new();
        store.insert(json!({"locale": "fr", "order": 1}));
        store.insert(json!({"locale": "de", "order": 2}));
        store.insert(json!({"locale": "en", "order": 2, "default": true}));

        let locales: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.locale)
            .collect();

        assert_eq!(locales, vec!["de", "en", "fr"]);
    }

    #[tokio::test]
    async fn test_find_by_locale() {
        let store = InMemoryLanguageStore::bootstrap();
        store.insert(json!({"locale": "de-CH", "slug": "de"}));

        let language = store.find_by_locale("de").await.unwrap().unwrap();
        assert_eq!(language.locale, "de-CH");

        assert!(store.find_by_locale("it").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_row_fails_creation() {
        let store = InMemoryLanguageStore::new();
        store.insert(json!({"locale": "de", "unknown_column": true}));

        let err = store.find_all().await.unwrap_err();
        assert!(matches!(err, LanguageError::CreationFailed { .. }));
    }
}
