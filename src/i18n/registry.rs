//! Locale registry: Single source of truth for all supported site locales.
//!
//! The site is published in a closed set of locales. Exactly one of them is
//! the default locale, which is served without a URL path prefix.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 language code used in URLs and CMS slugs (e.g., "en", "de")
    pub code: &'static str,

    /// Whether this is the default, unprefixed locale (only one should be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
///
/// Initialized once on first access and immutable thereafter. Iteration order
/// is fixed, which keeps generated sitemaps stable across calls.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale exists
    /// * `None` if the code is not a supported locale
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales in registry order.
    pub fn list_all(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Locales that appear as a URL path prefix (every locale except the default).
    pub fn list_prefixed(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| !locale.is_default).collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale
    /// (this indicates a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check whether `code` is a supported locale that is rendered as a path prefix.
    pub fn is_prefixed(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| !locale.is_default)
            .unwrap_or(false)
    }
}

/// Locales served by the site: English (default), French and German.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            is_default: true,
        },
        LocaleConfig {
            code: "fr",
            is_default: false,
        },
        LocaleConfig {
            code: "de",
            is_default: false,
        },
    ]
}
