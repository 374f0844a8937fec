use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Storyblok
    pub storyblok_token: String,
    pub storyblok_api_url: String,
    pub storyblok_per_page: u32,
    pub http_timeout_secs: u64,

    // Site
    pub base_url: String,
    pub preview_hosts: Vec<String>,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Storyblok - CDN delivery token
            storyblok_token: std::env::var("STORYBLOK_TOKEN")
                .context("STORYBLOK_TOKEN not set")?,
            storyblok_api_url: std::env::var("STORYBLOK_API_URL")
                .unwrap_or_else(|_| "https://api.storyblok.com/v2/cdn".to_string())
                .trim_end_matches('/')
                .to_string(),
            // The CDN API caps page size at 100
            storyblok_per_page: std::env::var("STORYBLOK_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100u32)
                .clamp(1, 100),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),

            // Site
            base_url: std::env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "https://vasion.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            preview_hosts: std::env::var("PREVIEW_HOSTS")
                .map(|v| parse_host_list(&v))
                .unwrap_or_default(),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// Whether a request `Host` header names a preview deployment.
    ///
    /// The port is ignored and the comparison is case-insensitive.
    /// Bracketed IPv6 literals (`[::1]:8080`) keep their brackets.
    pub fn is_preview_host(&self, host: &str) -> bool {
        let host = strip_port(host.trim());
        self.preview_hosts
            .iter()
            .any(|preview| preview.eq_ignore_ascii_case(host))
    }
}

/// Drop a trailing `:port` from a `Host` header value.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, _)) if !name.contains(':') => name,
        _ => host,
    }
}

/// Parse a comma-separated host list, dropping blanks.
fn parse_host_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
