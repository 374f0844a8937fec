use crate::config::Config;
use crate::robots::render_robots_txt;
use crate::seo::resolve_page_seo;
use crate::sitemap::generate_sitemap;
use crate::storyblok::StoryblokClient;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cms: StoryblokClient,
}

impl AppState {
    pub fn new(config: Config, cms: StoryblokClient) -> Self {
        Self {
            config: Arc::new(config),
            cms,
        }
    }
}

/// Application error rendered as a plain 500.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/robots.txt", get(robots_txt))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/seo", get(page_seo_root))
        .route("/seo/*path", get(page_seo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn robots_txt(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_robots_txt(&state.config.base_url),
    )
}

async fn sitemap_xml(State(state): State<AppState>) -> Result<Response, AppError> {
    let xml = generate_sitemap(&state.cms, &state.config.base_url).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        xml,
    )
        .into_response())
}

async fn page_seo_root(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    respond_with_page_seo(&state, "", &query, &headers).await
}

async fn page_seo(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
) -> Response {
    respond_with_page_seo(&state, &path, &query, &headers).await
}

async fn respond_with_page_seo(
    state: &AppState,
    path: &str,
    query: &[(String, String)],
    headers: &HeaderMap,
) -> Response {
    let preview = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| state.config.is_preview_host(host))
        .unwrap_or(false);

    let param_names = query.iter().map(|(name, _)| name.as_str());

    match resolve_page_seo(&state.cms, &state.config.base_url, path, param_names, preview).await {
        Some(metadata) => Json(metadata).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "not found" })),
        )
            .into_response(),
    }
}
