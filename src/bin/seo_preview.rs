//! SEO preview binary - prints the sitemap or a page's SEO metadata without running the server
//!
//! Usage:
//!   cargo run --bin seo-preview -- sitemap
//!   cargo run --bin seo-preview -- page /de/pricing
//!   cargo run --bin seo-preview -- page /de/pricing "utm_source=newsletter"
//!   cargo run --bin seo-preview -- page /pricing --preview
//!
//! Required environment variables:
//! - STORYBLOK_TOKEN
//!
//! Optional:
//! - STORYBLOK_API_URL (defaults to https://api.storyblok.com/v2/cdn)
//! - SITE_BASE_URL (defaults to https://vasion.com)

use anyhow::{bail, Context, Result};
use reqwest::Url;
use tracing::info;
use vasion_seo::{config::Config, seo, sitemap, storyblok::StoryblokClient};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vasion_seo=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = StoryblokClient::from_config(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let preview = args.iter().any(|a| a == "--preview");
    let positional: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    match positional.as_slice() {
        ["sitemap"] => {
            let xml = sitemap::generate_sitemap(&client, &config.base_url).await?;
            println!("{}", xml);
        }
        ["page", path, rest @ ..] => {
            let query = rest.first().copied().unwrap_or("");
            let param_names = query_param_names(query)?;
            info!("Resolving {} (preview: {})", path, preview);

            let metadata =
                seo::resolve_page_seo(&client, &config.base_url, path, &param_names, preview)
                    .await
                    .with_context(|| format!("No story found for {}", path))?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        _ => bail!("Usage: seo-preview sitemap | seo-preview page <path> [query] [--preview]"),
    }

    Ok(())
}

/// Decoded parameter names of a raw query string (`a=1&b` -> `["a", "b"]`).
fn query_param_names(query: &str) -> Result<Vec<String>> {
    let mut url = Url::parse("http://localhost/").context("Failed to build query parser URL")?;
    url.set_query(Some(query.trim_start_matches('?')));
    Ok(url.query_pairs().map(|(name, _)| name.into_owned()).collect())
}
