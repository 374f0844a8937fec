//! Internationalization (i18n) module for the site's locales.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Type-safe `Locale` validated against the registry
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Locale, LocaleRegistry};
//!
//! let german = Locale::from_code("de")?;
//! assert!(!german.is_default());
//!
//! let prefixed = LocaleRegistry::get().list_prefixed();
//! ```

mod locale;
mod registry;

pub use locale::Locale;
pub use registry::{LocaleConfig, LocaleRegistry};
