use crate::config::Config;
use crate::i18n::Locale;
use crate::story::{StoriesPage, Story, StoryResponse, StoryVersion};
use anyhow::Context;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Failure talking to the CMS.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("story not found: {0}")]
    NotFound(String),

    #[error("Storyblok API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Storyblok request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Storyblok response did not match the expected shape")]
    Decode(#[from] serde_json::Error),

    #[error("invalid Storyblok URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}

/// Client for the Storyblok content delivery API.
///
/// Constructed once at startup and shared; cloning is cheap.
#[derive(Debug, Clone)]
pub struct StoryblokClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    per_page: u32,
}

impl StoryblokClient {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            per_page: 100,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            &config.storyblok_api_url,
            &config.storyblok_token,
            Duration::from_secs(config.http_timeout_secs),
        )?
        .with_per_page(config.storyblok_per_page))
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Fetch a single story by slug in the given locale and version.
    pub async fn get_story(
        &self,
        slug: &str,
        locale: Locale,
        version: StoryVersion,
    ) -> Result<Story, FetchError> {
        let mut url = self.endpoint(&["stories"])?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_url.clone()))?
            .extend(slug.split('/').filter(|s| !s.is_empty()));

        let mut query = vec![
            ("token", self.token.clone()),
            ("version", version.as_str().to_string()),
        ];
        if !locale.is_default() {
            query.push(("language", locale.code().to_string()));
        }

        debug!("Fetching story '{}' ({}, {})", slug, locale, version.as_str());

        let response = self.http.get(url).query(&query).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(slug.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let body = response.bytes().await?;
        let envelope: StoryResponse = serde_json::from_slice(&body)?;
        Ok(envelope.story)
    }

    /// Fetch every story of the space, following pagination.
    ///
    /// Folder entries are included; callers filter them as needed.
    pub async fn list_all_stories(&self, version: StoryVersion) -> Result<Vec<Story>, FetchError> {
        let url = self.endpoint(&["stories"])?;
        let mut all_stories = Vec::new();
        let mut page: u32 = 1;

        loop {
            let query = [
                ("token", self.token.clone()),
                ("version", version.as_str().to_string()),
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ];

            let response = self.http.get(url.clone()).query(&query).send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(FetchError::Status { status, body });
            }

            let total: Option<usize> = response
                .headers()
                .get("total")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());

            let body = response.bytes().await?;
            let listing: StoriesPage = serde_json::from_slice(&body)?;
            let fetched = listing.stories.len();
            all_stories.extend(listing.stories);

            debug!("Fetched page {} ({} stories)", page, fetched);

            let done = match total {
                Some(total) => all_stories.len() >= total || fetched == 0,
                None => fetched < self.per_page as usize,
            };
            if done {
                break;
            }
            page += 1;
        }

        info!("Listed {} stories from Storyblok", all_stories.len());
        Ok(all_stories)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|_| FetchError::InvalidUrl(self.api_url.clone()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
