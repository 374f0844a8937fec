//! Typed view of the CMS story fields this service reads.
//!
//! Stories arrive as loosely shaped JSON; only the fields listed here are
//! trusted. Anything else in the payload is ignored at deserialization.
//! Optional editorial fields of the wrong type are dropped rather than
//! failing the whole story.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Deserialize a field, mapping a value of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], falling back to `T::default()`.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Content version requested from the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryVersion {
    Draft,
    Published,
}

impl StoryVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryVersion::Draft => "draft",
            StoryVersion::Published => "published",
        }
    }
}

/// A translated sibling of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationEntry {
    /// Locale code of the sibling (e.g., "de")
    pub lang: String,
    /// Slug of the sibling in its own locale
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// SEO fields edited in the CMS metadata plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoFields {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub og_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContent {
    #[serde(default, deserialize_with = "lenient")]
    pub metadata: Option<SeoFields>,
    /// Explicit `false` marks the page as not indexable
    #[serde(default, deserialize_with = "lenient")]
    pub index: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    #[serde(default)]
    pub name: String,
    pub full_slug: String,
    #[serde(default)]
    pub is_folder: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub translated_slugs: Vec<TranslationEntry>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub content: StoryContent,
}

impl Story {
    pub fn noindex(&self) -> bool {
        self.content.index == Some(false)
    }

    pub fn seo_fields(&self) -> SeoFields {
        self.content.metadata.clone().unwrap_or_default()
    }

    /// `published_at` as ISO-8601 with millisecond precision (`2025-08-11T09:11:09.797Z`).
    pub fn lastmod(&self) -> Option<String> {
        self.published_at
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Envelope of a single-story response.
#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub story: Story,
}

/// One page of a bulk story listing.
#[derive(Debug, Deserialize)]
pub struct StoriesPage {
    #[serde(default)]
    pub stories: Vec<Story>,
}
