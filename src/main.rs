use anyhow::{Context, Result};
use tracing::info;
use vasion_seo::config::Config;
use vasion_seo::server::{router, AppState};
use vasion_seo::storyblok::StoryblokClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("vasion_seo=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let cms = StoryblokClient::from_config(&config)?;

    info!("Site base URL: {}", config.base_url);
    if !config.preview_hosts.is_empty() {
        info!("Preview hosts: {}", config.preview_hosts.join(", "));
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let app = router(AppState::new(config, cms));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
