//! Slug normalization.
//!
//! The CMS stores each localized homepage as `<lang>/home` (or `home` for the
//! default locale). Public URLs never carry the locale folder of the slug or
//! the `home` marker, so both are removed here. All matching is done on whole
//! `/`-separated segments: `home-improvement` and `work-from-home` are
//! ordinary slugs.

use crate::i18n::{Locale, LocaleRegistry};
use crate::routing::HOME_SLUG;
use regex::Regex;
use std::sync::OnceLock;

static LOCALE_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches a leading prefixed-locale segment, e.g. `fr/` or a bare `de`.
fn locale_prefix_regex() -> &'static Regex {
    LOCALE_PREFIX_REGEX.get_or_init(|| {
        let codes: Vec<_> = LocaleRegistry::get()
            .list_prefixed()
            .iter()
            .map(|locale| regex::escape(locale.code))
            .collect();
        Regex::new(&format!(r"^({})(?:/|$)", codes.join("|")))
            .expect("locale prefix pattern is valid")
    })
}

/// Produce the locale-independent path fragment for a CMS slug.
///
/// Returns an empty string for a homepage; otherwise the cleaned fragment
/// without leading or trailing slashes.
pub fn normalize_slug(full_slug: &str, locale: Locale) -> String {
    let trimmed = full_slug.trim_matches('/');
    let without_locale = strip_locale_segment(trimmed, locale.code());
    remove_home_segments(without_locale)
        .trim_matches('/')
        .to_string()
}

/// Strip a leading prefixed-locale segment (`fr/`, `de/`), whichever it is.
///
/// The default locale code is left alone.
pub fn strip_any_locale_prefix(slug: &str) -> &str {
    match locale_prefix_regex().find(slug) {
        Some(m) => &slug[m.end()..],
        None => slug,
    }
}

/// The prefixed locale a slug starts with, if any.
pub fn detect_locale_prefix(slug: &str) -> Option<Locale> {
    locale_prefix_regex()
        .captures(slug)
        .and_then(|caps| caps.get(1))
        .and_then(|code| Locale::from_code(code.as_str()).ok())
}

/// Strip `code` when it is the first whole segment of `slug`.
fn strip_locale_segment<'a>(slug: &'a str, code: &str) -> &'a str {
    if slug == code {
        return "";
    }
    slug.strip_prefix(code)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(slug)
}

/// Drop every segment that is exactly `home`.
fn remove_home_segments(slug: &str) -> String {
    slug.split('/')
        .filter(|segment| *segment != HOME_SLUG)
        .collect::<Vec<_>>()
        .join("/")
}
