//! Locale resolution for inbound request paths.
//!
//! Every request path maps deterministically to a `(locale, slug)` pair. A
//! leading segment naming a prefixed locale selects that locale; anything
//! else is served in the default locale. Whether the slug exists is decided
//! later by the CMS fetch.

use crate::i18n::{Locale, LocaleRegistry};

/// CMS slug of every locale's homepage item.
pub const HOME_SLUG: &str = "home";

/// Result of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub locale: Locale,
    pub content_slug_segments: Vec<String>,
    locale_segment: Option<String>,
}

impl ResolvedPath {
    /// Slug to request from the CMS for this path.
    ///
    /// An empty content path is the homepage, stored as `home` in every locale.
    pub fn fetch_slug(&self) -> String {
        if self.content_slug_segments.is_empty() {
            HOME_SLUG.to_string()
        } else {
            self.content_slug_segments.join("/")
        }
    }

    /// The request path as a slug, locale segment included (`de/pricing`).
    pub fn request_slug(&self) -> String {
        self.locale_segment
            .iter()
            .chain(self.content_slug_segments.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Resolve the active locale and content slug from request path segments.
///
/// Segments are expected URL-decoded and free of empty strings
/// (see [`split_path`]).
pub fn resolve_locale<S: AsRef<str>>(segments: &[S]) -> ResolvedPath {
    let registry = LocaleRegistry::get();

    if let Some(first) = segments.first().map(AsRef::as_ref) {
        if registry.is_prefixed(first) {
            if let Ok(locale) = Locale::from_code(first) {
                return ResolvedPath {
                    locale,
                    content_slug_segments: segments[1..]
                        .iter()
                        .map(|s| s.as_ref().to_string())
                        .collect(),
                    locale_segment: Some(first.to_string()),
                };
            }
        }
    }

    ResolvedPath {
        locale: Locale::default_locale(),
        content_slug_segments: segments.iter().map(|s| s.as_ref().to_string()).collect(),
        locale_segment: None,
    }
}

/// Split a URL path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== resolve_locale Tests ====================

    #[test]
    fn test_locale_only_resolves_to_home() {
        let resolved = resolve_locale(&["de"]);
        assert_eq!(resolved.locale, Locale::DE);
        assert!(resolved.content_slug_segments.is_empty());
        assert_eq!(resolved.fetch_slug(), "home");
        assert_eq!(resolved.request_slug(), "de");
    }

    #[test]
    fn test_locale_with_page() {
        let resolved = resolve_locale(&["de", "pricing"]);
        assert_eq!(resolved.locale, Locale::DE);
        assert_eq!(resolved.content_slug_segments, vec!["pricing"]);
        assert_eq!(resolved.fetch_slug(), "pricing");
    }

    #[test]
    fn test_root_resolves_to_default_home() {
        let empty: [&str; 0] = [];
        let resolved = resolve_locale(&empty);
        assert_eq!(resolved.locale, Locale::EN);
        assert!(resolved.content_slug_segments.is_empty());
        assert_eq!(resolved.fetch_slug(), "home");
        assert_eq!(resolved.request_slug(), "");
    }

    #[test]
    fn test_unprefixed_path_is_default_locale() {
        let resolved = resolve_locale(&["products", "print-management"]);
        assert_eq!(resolved.locale, Locale::EN);
        assert_eq!(
            resolved.content_slug_segments,
            vec!["products", "print-management"]
        );
        assert_eq!(resolved.fetch_slug(), "products/print-management");
    }

    #[test]
    fn test_default_locale_segment_is_not_a_prefix() {
        let resolved = resolve_locale(&["en", "about"]);
        assert_eq!(resolved.locale, Locale::EN);
        assert_eq!(resolved.content_slug_segments, vec!["en", "about"]);
    }

    #[test]
    fn test_locale_code_deeper_in_path_is_content() {
        let resolved = resolve_locale(&["blog", "fr"]);
        assert_eq!(resolved.locale, Locale::EN);
        assert_eq!(resolved.fetch_slug(), "blog/fr");
    }

    #[test]
    fn test_unknown_locale_like_segment() {
        let resolved = resolve_locale(&["es", "about"]);
        assert_eq!(resolved.locale, Locale::EN);
        assert_eq!(resolved.fetch_slug(), "es/about");
    }

    #[test]
    fn test_request_slug_keeps_locale_segment() {
        assert_eq!(resolve_locale(&["fr", "a", "b"]).request_slug(), "fr/a/b");
        assert_eq!(resolve_locale(&["fr"]).request_slug(), "fr");
        assert_eq!(resolve_locale(&["about"]).request_slug(), "about");
    }

    // ==================== split_path Tests ====================

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/de/about/"), vec!["de", "about"]);
        assert_eq!(split_path("de//about"), vec!["de", "about"]);
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
    }
}
