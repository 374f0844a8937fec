//! XML sitemap generation.
//!
//! Every published, non-folder story is emitted once per supported locale,
//! each `<url>` carrying an `xhtml:link` alternate that points at itself.
//! The document is computed fresh on every call.

use crate::i18n::Locale;
use crate::slug::{detect_locale_prefix, normalize_slug};
use crate::story::{Story, StoryVersion};
use crate::storyblok::StoryblokClient;
use crate::urls::{build_canonical_url, locale_base_url};
use anyhow::{Context, Result};
use tracing::info;

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#;
const URLSET_CLOSE: &str = "</urlset>";

/// One `<url>` entry of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub locale: Locale,
    pub loc: String,
    pub lastmod: Option<String>,
}

/// Locale-independent slug of a story (`de/about` -> `about`, `fr/home` -> ``).
pub fn base_slug(full_slug: &str) -> String {
    let trimmed = full_slug.trim_matches('/');
    let locale = detect_locale_prefix(trimmed).unwrap_or_default();
    normalize_slug(trimmed, locale)
}

/// Fan published stories out across all locales, skipping folders.
pub fn sitemap_entries(base_url: &str, stories: &[Story]) -> Vec<SitemapEntry> {
    let locales = Locale::all();

    stories
        .iter()
        .filter(|story| !story.is_folder)
        .flat_map(|story| {
            let slug = base_slug(&story.full_slug);
            let lastmod = story.lastmod();
            locales.iter().map(move |locale| SitemapEntry {
                locale: *locale,
                loc: build_canonical_url(&locale_base_url(base_url, *locale), &slug),
                lastmod: lastmod.clone(),
            })
        })
        .collect()
}

/// Render the full `<urlset>` document for a set of stories.
pub fn render_sitemap(base_url: &str, stories: &[Story]) -> String {
    let entries = sitemap_entries(base_url, stories);

    let mut xml = String::new();
    xml.push_str(XML_HEADER);
    xml.push('\n');
    xml.push_str(URLSET_OPEN);
    xml.push('\n');

    for entry in &entries {
        let loc = escape_xml(&entry.loc);
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", loc));
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
        }
        xml.push_str(&format!(
            "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />\n",
            entry.locale.code(),
            loc
        ));
        xml.push_str("  </url>\n");
    }

    xml.push_str(URLSET_CLOSE);
    xml.push('\n');
    xml
}

/// Fetch all published stories and render the sitemap.
///
/// A failed bulk listing is returned to the caller unchanged; there is no fallback.
pub async fn generate_sitemap(client: &StoryblokClient, base_url: &str) -> Result<String> {
    let stories = client
        .list_all_stories(StoryVersion::Published)
        .await
        .context("Failed to list stories for sitemap")?;

    let xml = render_sitemap(base_url, &stories);
    info!("Generated sitemap from {} stories", stories.len());
    Ok(xml)
}

/// Escape text for use in XML element content and double-quoted attributes.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
