//! Integration tests for the localization workflow: store to registry to
//! resolver to localized routes and generated URLs.

use std::sync::Arc;

use locale_routes::{
    InMemoryLanguageStore, Language, LanguageResolver, LanguageStore, Languages, LocaleConfig,
    PathLanguageResolver, Route, RouteLocalizer, Translations, Translator,
};
use serde_json::json;

fn urls(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn route_translator() -> Arc<dyn Translator> {
    Arc::new(
        Translations::new()
            .with_resource(
                "routes",
                "en",
                [("checkout", "checkout"), ("payment", "payment")],
            )
            .with_resource("routes", "de", [("checkout", "kasse"), ("payment", "zahlung")]),
    )
}

#[test]
fn localized_route_urls_without_translator() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de").with_fallback("en"),
        ])
        .unwrap(),
    );

    let localizer = RouteLocalizer::new(languages);
    let mut route = Route::new("foo", "{?locale}/foo");
    localizer.localize_route(&mut route, &[]);

    assert_eq!(
        route.translated_urls("https://example.com"),
        urls(&[
            ("en", "https://example.com/foo"),
            ("de", "https://example.com/de/foo"),
        ])
    );
    assert!(route.domained_urls().is_empty());

    let locales = route.localization();
    assert_eq!(locales.locale_fallbacks().get("de"), Some(&"en".to_string()));
    assert_eq!(locales.locale_omit(), Some("en"));
}

#[test]
fn localized_route_urls_with_translator() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de").with_fallback("en"),
        ])
        .unwrap(),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(route_translator());
    let mut route = Route::new("foo", "{?locale}/{checkout}/{payment}");
    localizer.localize_route(&mut route, &["checkout", "payment"]);

    assert_eq!(
        route.translated_urls("https://example.com"),
        urls(&[
            ("en", "https://example.com/checkout/payment"),
            ("de", "https://example.com/de/kasse/zahlung"),
        ])
    );
}

#[test]
fn domained_languages_produce_per_domain_urls() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(), // shared language as no domain
            Language::new("de").with_domain("example.de").as_default(),
            Language::new("fr").with_domain("example.fr").as_default(),
        ])
        .unwrap(),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(route_translator());
    let mut route = Route::new("foo", "{?locale}/{checkout}/{payment}");
    localizer.localize_route(&mut route, &["checkout", "payment"]);

    assert_eq!(
        route.domain_translated_urls("example.de").unwrap(),
        urls(&[
            ("de", "https://example.de/kasse/zahlung"),
            ("en", "https://example.de/en/checkout/payment"),
        ])
    );

    // fr has no translations configured, so the raw segments remain.
    assert_eq!(
        route.domain_translated_urls("example.fr").unwrap(),
        urls(&[
            ("fr", "https://example.fr/checkout/payment"),
            ("en", "https://example.fr/en/checkout/payment"),
        ])
    );

    assert_eq!(
        route.domained_urls(),
        urls(&[
            ("example.de", "https://example.de/kasse/zahlung"),
            ("example.fr", "https://example.fr/checkout/payment"),
        ])
    );
}

#[test]
fn route_group_segments_translate_like_routes() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de").with_fallback("en"),
        ])
        .unwrap(),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(route_translator());

    // Only the group prefix segment is localized here; the nested payment
    // segment keeps its raw text.
    let mut group = Route::group("foo", "{?locale}/{checkout}/payment");
    localizer.localize_route(&mut group, &["checkout"]);

    assert_eq!(
        group.translated_urls("https://example.com"),
        urls(&[
            ("en", "https://example.com/checkout/payment"),
            ("de", "https://example.com/de/kasse/payment"),
        ])
    );
}

#[test]
fn resource_compound_segment_translates_only_the_action_path() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de").with_fallback("en"),
        ])
        .unwrap(),
    );

    let translator = Arc::new(
        Translations::new()
            .with_resource("routes", "en", [("products", "products"), ("edit", "edit")])
            .with_resource(
                "routes",
                "de",
                [("products", "produkte"), ("edit", "bearbeiten")],
            ),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(translator);
    let mut resource = Route::resource("products", "{?locale}/{products}");
    localizer.localize_route(&mut resource, &["products", "edit.edit"]);

    // Index paths carry only the translated resource segment.
    assert_eq!(
        resource.translated_urls("https://example.com"),
        urls(&[
            ("en", "https://example.com/products"),
            ("de", "https://example.com/de/produkte"),
        ])
    );

    // The edit sub-route additionally carries the translated action text.
    assert_eq!(
        resource.action_translated_urls("https://example.com", "edit", &["5"]),
        urls(&[
            ("en", "https://example.com/products/5/edit"),
            ("de", "https://example.com/de/produkte/5/bearbeiten"),
        ])
    );
}

#[test]
fn missing_translations_fall_back_to_slugged_raw_segments() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de"),
        ])
        .unwrap(),
    );

    let translator = Arc::new(
        Translations::new().with_resource("routes", "en", [("checkout", "check Out")]),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(translator);
    let mut route = Route::new("foo", "{?locale}/{checkout}");
    localizer.localize_route(&mut route, &["checkout"]);

    assert_eq!(
        route.translated_urls("https://example.com"),
        urls(&[
            ("en", "https://example.com/check-out"),
            ("de", "https://example.com/de/checkout"),
        ])
    );
}

#[tokio::test]
async fn store_to_resolver_to_localizer_pipeline() {
    let store = InMemoryLanguageStore::bootstrap();
    store.insert(json!({
        "locale": "de-CH",
        "slug": "de",
        "name": "Deutsch",
        "fallback": "en",
        "order": -1,
    }));

    let languages = Arc::new(Languages::new(store.find_all().await.unwrap()).unwrap());
    assert_eq!(languages.slugs(), vec!["en", "de"]);

    let resolver = PathLanguageResolver::new();
    let context = resolver.resolve("/de/checkout", &languages).unwrap();
    assert_eq!(context.current_or(&languages).locale, "de-CH");

    let localizer = RouteLocalizer::new(Arc::clone(&languages));
    let mut route = Route::new("checkout", "{?locale}/checkout");
    localizer.localize_route_in(&context, &mut route, &[]);

    let locales = route.localization();
    assert_eq!(locales.locale(), Some("de"));
    assert_eq!(locales.locale_omit(), Some("en"));
    assert_eq!(locales.locale_fallbacks().get("de"), Some(&"en".to_string()));
}

#[test]
fn config_drives_resolver_and_localizer() {
    let config = LocaleConfig::from_json(
        r#"{
            "allow_fallback_to_default": false,
            "languages": [
                {"locale": "en", "default": true},
                {"locale": "de-CH", "slug": "de", "fallback": "en"}
            ]
        }"#,
    )
    .unwrap();

    let languages = Arc::new(config.build_registry().unwrap());
    let resolver =
        PathLanguageResolver::new().with_fallback_to_default(config.allow_fallback_to_default);

    // Unknown slug with fallback disabled: fail-soft keeps the default.
    let context = resolver.resolve_soft("/fr/checkout", &languages);
    assert_eq!(context.current_or(&languages).locale, "en");

    let localizer = RouteLocalizer::new(Arc::clone(&languages))
        .with_translation_source(config.translation_source.clone());
    let mut route = Route::new("checkout", "{?locale}/checkout");
    localizer.localize_route_in(&context, &mut route, &[]);

    assert_eq!(route.localization().locale(), Some("en"));
}

#[test]
fn localizing_twice_yields_identical_metadata() {
    let languages = Arc::new(
        Languages::new(vec![
            Language::new("en").as_default(),
            Language::new("de").with_domain("example.de").as_default(),
        ])
        .unwrap(),
    );

    let localizer = RouteLocalizer::new(languages).with_translator(route_translator());
    let mut route = Route::new("foo", "{?locale}/{checkout}");

    localizer.localize_route(&mut route, &["checkout"]);
    let first = route.clone();

    localizer.localize_route(&mut route, &["checkout"]);
    assert_eq!(route.scoped_domains(), first.scoped_domains());
    assert_eq!(
        route.domain_localization("example.de"),
        first.domain_localization("example.de")
    );
}
