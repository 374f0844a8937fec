//! Canonical and alternate-language URL construction.
//!
//! All functions here are plain string composition; nothing touches the
//! network or the filesystem.

use crate::i18n::Locale;
use crate::slug::{normalize_slug, strip_any_locale_prefix};
use crate::story::TranslationEntry;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Hreflang key used for the fallback language version.
pub const X_DEFAULT: &str = "x-default";

/// Mapping from hreflang key (locale code or `x-default`) to an absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlternateLinkSet {
    links: BTreeMap<String, String>,
}

impl AlternateLinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, hreflang: impl Into<String>, url: impl Into<String>) {
        self.links.insert(hreflang.into(), url.into());
    }

    pub fn get(&self, hreflang: &str) -> Option<&str> {
        self.links.get(hreflang).map(String::as_str)
    }

    pub fn x_default(&self) -> Option<&str> {
        self.get(X_DEFAULT)
    }

    pub fn contains(&self, hreflang: &str) -> bool {
        self.links.contains_key(hreflang)
    }
}

/// Root URL of a locale: the bare base URL for the default locale,
/// `<base>/<code>` otherwise.
pub fn locale_base_url(base_url: &str, locale: Locale) -> String {
    let base = base_url.trim_end_matches('/');
    if locale.is_default() {
        base.to_string()
    } else {
        format!("{}/{}", base, locale.code())
    }
}

/// Join a base URL and a normalized slug. Never ends in `/`.
pub fn build_canonical_url(base_url: &str, normalized_slug: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let slug = normalized_slug.trim_matches('/');
    if slug.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, slug).trim_end_matches('/').to_string()
    }
}

/// Canonical URL of `slug` served in `locale`.
pub fn localized_url(base_url: &str, locale: Locale, slug: &str) -> String {
    build_canonical_url(
        &locale_base_url(base_url, locale),
        &normalize_slug(slug, locale),
    )
}

/// Build the hreflang alternate set for a page.
///
/// `current_slug` is the request path as a slug (locale segment included).
/// The current locale's own entry is only added when `include_self` is set;
/// sibling translations are always added. An `en` entry is then guaranteed
/// and `x-default` mirrors it. For an `en` page with `include_self` unset the
/// guarantee re-adds the `en` entry.
pub fn build_alternate_links(
    base_url: &str,
    current_locale: Locale,
    current_slug: &str,
    translations: &[TranslationEntry],
    include_self: bool,
) -> AlternateLinkSet {
    let mut links = AlternateLinkSet::new();

    if include_self {
        links.insert(
            current_locale.code(),
            localized_url(base_url, current_locale, current_slug),
        );
    }

    let mut explicit_default: Option<String> = None;
    for entry in translations {
        let locale = match Locale::from_code(&entry.lang) {
            Ok(locale) => locale,
            Err(_) => {
                debug!("Skipping alternate link for unsupported language '{}'", entry.lang);
                continue;
            }
        };

        let url = localized_url(base_url, locale, &entry.path);
        if locale.is_default() {
            explicit_default = Some(url.clone());
        }
        links.insert(locale.code(), url);
    }

    let default_locale = Locale::default_locale();
    let default_url = match explicit_default {
        Some(url) => url,
        None if !current_locale.is_default() && segment_count(current_slug) == 1 => {
            build_canonical_url(base_url, "")
        }
        None => build_canonical_url(
            base_url,
            &normalize_slug(strip_any_locale_prefix(current_slug.trim_matches('/')), default_locale),
        ),
    };

    links.insert(default_locale.code(), default_url.clone());
    links.insert(X_DEFAULT, default_url);

    links
}

fn segment_count(slug: &str) -> usize {
    slug.split('/').filter(|segment| !segment.is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: &str = "https://vasion.com";

    fn entry(lang: &str, path: &str) -> TranslationEntry {
        TranslationEntry {
            lang: lang.to_string(),
            path: path.to_string(),
            name: None,
        }
    }

    // ==================== build_canonical_url Tests ====================

    #[test]
    fn test_canonical_for_homepage_is_bare_base() {
        assert_eq!(build_canonical_url(BASE, ""), BASE);
        assert_eq!(build_canonical_url("https://vasion.com/", ""), BASE);
    }

    #[test]
    fn test_canonical_joins_slug() {
        assert_eq!(build_canonical_url(BASE, "about"), "https://vasion.com/about");
        assert_eq!(
            build_canonical_url("https://vasion.com/de", "products/output/"),
            "https://vasion.com/de/products/output"
        );
    }

    #[test]
    fn test_locale_base_url() {
        assert_eq!(locale_base_url(BASE, Locale::EN), BASE);
        assert_eq!(locale_base_url(BASE, Locale::DE), "https://vasion.com/de");
        assert_eq!(locale_base_url("https://vasion.com/", Locale::FR), "https://vasion.com/fr");
    }

    #[test]
    fn test_localized_url() {
        assert_eq!(localized_url(BASE, Locale::DE, "de/home"), "https://vasion.com/de");
        assert_eq!(localized_url(BASE, Locale::DE, "de/about"), "https://vasion.com/de/about");
        assert_eq!(localized_url(BASE, Locale::EN, "home"), BASE);
        assert_eq!(localized_url(BASE, Locale::FR, "pricing"), "https://vasion.com/fr/pricing");
    }

    // ==================== build_alternate_links Tests ====================

    #[test]
    fn test_alternates_include_self_and_translations() {
        let translations = vec![entry("fr", "pricing"), entry("en", "pricing")];
        let links = build_alternate_links(BASE, Locale::DE, "de/pricing", &translations, true);

        assert_eq!(links.get("de"), Some("https://vasion.com/de/pricing"));
        assert_eq!(links.get("fr"), Some("https://vasion.com/fr/pricing"));
        assert_eq!(links.get("en"), Some("https://vasion.com/pricing"));
        assert_eq!(links.x_default(), Some("https://vasion.com/pricing"));
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_self_suppressed_but_siblings_kept() {
        let translations = vec![entry("fr", "pricing")];
        let links = build_alternate_links(BASE, Locale::DE, "de/pricing", &translations, false);

        assert!(!links.contains("de"));
        assert_eq!(links.get("fr"), Some("https://vasion.com/fr/pricing"));
        assert_eq!(links.get("en"), Some("https://vasion.com/pricing"));
    }

    #[test]
    fn test_sibling_entry_for_current_locale_is_still_added() {
        // Suppression applies to the computed self link, not to translation entries.
        let translations = vec![entry("de", "pricing")];
        let links = build_alternate_links(BASE, Locale::DE, "de/pricing", &translations, false);
        assert_eq!(links.get("de"), Some("https://vasion.com/de/pricing"));
    }

    #[test]
    fn test_localized_homepage_falls_back_to_bare_base_for_en() {
        let links = build_alternate_links(BASE, Locale::FR, "fr", &[], true);
        assert_eq!(links.get("fr"), Some("https://vasion.com/fr"));
        assert_eq!(links.get("en"), Some(BASE));
        assert_eq!(links.x_default(), Some(BASE));
    }

    #[test]
    fn test_en_fallback_strips_locale_prefix() {
        let links = build_alternate_links(BASE, Locale::DE, "de/solutions/education", &[], true);
        assert_eq!(links.get("en"), Some("https://vasion.com/solutions/education"));
    }

    #[test]
    fn test_explicit_en_translation_wins() {
        let translations = vec![entry("en", "about-us")];
        let links = build_alternate_links(BASE, Locale::DE, "de/ueber-uns", &translations, true);
        assert_eq!(links.get("en"), Some("https://vasion.com/about-us"));
        assert_eq!(links.x_default(), Some("https://vasion.com/about-us"));
    }

    #[test]
    fn test_en_page_with_self_suppressed_readds_en() {
        let links = build_alternate_links(BASE, Locale::EN, "about", &[], false);
        assert_eq!(links.get("en"), Some("https://vasion.com/about"));
        assert_eq!(links.x_default(), Some("https://vasion.com/about"));
    }

    #[test]
    fn test_en_root_page() {
        let links = build_alternate_links(BASE, Locale::EN, "", &[entry("de", "home")], true);
        assert_eq!(links.get("en"), Some(BASE));
        assert_eq!(links.get("de"), Some("https://vasion.com/de"));
        assert_eq!(links.x_default(), Some(BASE));
    }

    #[test]
    fn test_unsupported_translation_language_is_skipped() {
        let translations = vec![entry("es", "precios"), entry("fr", "tarifs")];
        let links = build_alternate_links(BASE, Locale::EN, "pricing", &translations, true);
        assert!(!links.contains("es"));
        assert_eq!(links.get("fr"), Some("https://vasion.com/fr/tarifs"));
    }

    #[test]
    fn test_serializes_as_json_object() {
        let links = build_alternate_links(BASE, Locale::EN, "about", &[], true);
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(json["en"], "https://vasion.com/about");
        assert_eq!(json["x-default"], "https://vasion.com/about");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_canonical_never_ends_with_slash(slug in "[a-z]{1,8}(/[a-z]{1,8}){0,3}/{0,3}") {
            let url = build_canonical_url(BASE, &slug);
            prop_assert!(!url.ends_with('/'));
        }

        #[test]
        fn prop_x_default_mirrors_en(
            locale_index in 0usize..3,
            slug in "[a-z]{1,8}(/[a-z]{1,8}){0,2}",
            include_self in any::<bool>(),
        ) {
            let locale = Locale::all()[locale_index];
            let current = if locale.is_default() {
                slug.clone()
            } else {
                format!("{}/{}", locale.code(), slug)
            };
            let links = build_alternate_links(BASE, locale, &current, &[], include_self);
            prop_assert_eq!(links.x_default(), links.get("en"));
        }
    }
}
