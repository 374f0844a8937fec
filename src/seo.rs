//! Page SEO metadata: canonical URL, hreflang alternates and robots flags.

use crate::fallback::with_fallback;
use crate::i18n::Locale;
use crate::routing::{resolve_locale, split_path, ResolvedPath};
use crate::story::{Story, StoryVersion};
use crate::storyblok::StoryblokClient;
use crate::tracking::should_include_self_referencing_hreflang;
use crate::urls::{build_alternate_links, localized_url, AlternateLinkSet};
use serde::Serialize;
use tracing::{info, warn};

/// Metadata handed to the page renderer for its `<head>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoMetadata {
    pub locale: Locale,
    pub canonical: String,
    pub alternates: AlternateLinkSet,
    pub noindex: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

/// Compose locale resolution, URL building and the tracking policy for a page.
pub fn compute_seo_metadata<S, I, Q>(
    base_url: &str,
    slug_segments: &[S],
    story: &Story,
    query_param_names: I,
) -> SeoMetadata
where
    S: AsRef<str>,
    I: IntoIterator<Item = Q>,
    Q: AsRef<str>,
{
    let resolved = resolve_locale(slug_segments);
    let request_slug = resolved.request_slug();
    let include_self = should_include_self_referencing_hreflang(query_param_names);

    let canonical = localized_url(base_url, resolved.locale, &request_slug);
    let alternates = build_alternate_links(
        base_url,
        resolved.locale,
        &request_slug,
        &story.translated_slugs,
        include_self,
    );

    let fields = story.seo_fields();
    SeoMetadata {
        locale: resolved.locale,
        canonical,
        alternates,
        noindex: story.noindex(),
        title: fields.title,
        description: fields.description,
        og_image: fields.og_image,
    }
}

/// Fetch the story behind a resolved path.
///
/// The published version is tried first. On preview hosts a failed
/// published fetch falls back to the draft version once. Any remaining
/// failure is logged and reported as `None` (not found).
pub async fn fetch_page_story(
    client: &StoryblokClient,
    resolved: &ResolvedPath,
    preview: bool,
) -> Option<Story> {
    let slug = resolved.fetch_slug();
    let locale = resolved.locale;

    let result = with_fallback(
        &format!("Story '{}' ({})", slug, locale),
        || client.get_story(&slug, locale, StoryVersion::Published),
        preview,
        || client.get_story(&slug, locale, StoryVersion::Draft),
    )
    .await;

    match result {
        Ok(story) => Some(story),
        Err(e) if e.is_not_found() => {
            info!("No story for '{}' ({})", slug, locale);
            None
        }
        Err(e) => {
            warn!(
                "Treating story '{}' ({}) as not found: {:#}",
                slug,
                locale,
                anyhow::Error::new(e)
            );
            None
        }
    }
}

/// Resolve a request path to its SEO metadata, fetching the story from the CMS.
///
/// Returns `None` when the page does not exist.
pub async fn resolve_page_seo<I, Q>(
    client: &StoryblokClient,
    base_url: &str,
    path: &str,
    query_param_names: I,
    preview: bool,
) -> Option<SeoMetadata>
where
    I: IntoIterator<Item = Q>,
    Q: AsRef<str>,
{
    let segments = split_path(path);
    let resolved = resolve_locale(&segments);
    let story = fetch_page_story(client, &resolved, preview).await?;
    Some(compute_seo_metadata(base_url, &segments, &story, query_param_names))
}
