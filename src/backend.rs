use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use dev_site::log::{self, log_event, LogLevel, DEFAULT_LOG_LEVEL};
use dev_site::routes::Route;
use serde::Serialize;
use serde_json::json;
use std::{
    fmt::Write as _,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};
use url::Url;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_STATIC_MAX_AGE_SECONDS: u64 = 3_600;

const STATIC_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const SITEMAP_MAX_AGE_SECONDS: u64 = 3_600;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("invalid SITE_BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid SITE_BASE_URL {value:?}: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("static directory {0} has no index.html; run `trunk build --release` first")]
    MissingDist(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub bind_addr: SocketAddr,
    pub dist_dir: PathBuf,
    pub base_url: Url,
    pub static_max_age_seconds: u64,
    pub log_level: LogLevel,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, SiteError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unparseable numbers and levels fall back to their defaults; a bad address or
    /// base URL is an error since the server cannot do anything sensible with it.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SiteError> {
        let bind_value = parse_non_empty_string(&lookup, "SITE_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| SiteError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let dist_dir = parse_non_empty_string(&lookup, "SITE_DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));

        let base_value = parse_non_empty_string(&lookup, "SITE_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_http_url(&base_value)?;

        Ok(Self {
            bind_addr,
            dist_dir,
            base_url,
            static_max_age_seconds: parse_u64_with_bounds(
                &lookup,
                "SITE_STATIC_MAX_AGE_SECONDS",
                DEFAULT_STATIC_MAX_AGE_SECONDS,
                STATIC_MAX_AGE_SECONDS_BOUNDS,
            ),
            log_level: LogLevel::parse_or(
                parse_non_empty_string(&lookup, "LOG_LEVEL").as_deref(),
                DEFAULT_LOG_LEVEL,
            ),
        })
    }

    fn index_file(&self) -> PathBuf {
        self.dist_dir.join("index.html")
    }
}

#[derive(Clone)]
struct AppState {
    sitemap: Arc<str>,
}

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
    version: &'static str,
}

pub async fn run() -> Result<(), SiteError> {
    let config = SiteConfig::from_env()?;
    log::set_min_level(config.log_level);
    ensure_dist(&config.dist_dir)?;

    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log_event(
        LogLevel::Info,
        "server_started",
        json!({
            "addr": config.bind_addr.to_string(),
            "dist": config.dist_dir.display().to_string(),
            "base_url": config.base_url.as_str(),
        }),
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log_event(LogLevel::Info, "server_stopped", json!({}));
    Ok(())
}

fn router(config: &SiteConfig) -> Router {
    let state = AppState {
        sitemap: Arc::from(render_sitemap(&config.base_url)),
    };

    // Unknown paths get the app shell so client-side routes survive a reload.
    let static_service =
        ServeDir::new(&config.dist_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/sitemap.xml", get(sitemap))
        .fallback_service(static_service)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control(&format!("public, max-age={}", config.static_max_age_seconds)),
        ))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, cache_control("no-store"))],
        Json(HealthPayload {
            ok: true,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    log_event(
        LogLevel::Debug,
        "sitemap_served",
        json!({ "bytes": state.sitemap.len() }),
    );

    (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/xml; charset=utf-8"),
            ),
            (
                header::CACHE_CONTROL,
                cache_control(&format!("public, max-age={SITEMAP_MAX_AGE_SECONDS}")),
            ),
        ],
        state.sitemap.to_string(),
    )
}

/// `<urlset>` for every indexable route, resolved against `base_url`.
pub fn render_sitemap(base_url: &Url) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for route in Route::indexable() {
        let Some(priority) = route.sitemap_priority() else {
            continue;
        };
        let Ok(location) = base_url.join(&route.path()) else {
            continue;
        };

        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <priority>{priority:.1}</priority>\n  </url>\n",
            escape_xml(location.as_str()),
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn ensure_dist(dist_dir: &Path) -> Result<(), SiteError> {
    if dist_dir.join("index.html").is_file() {
        Ok(())
    } else {
        Err(SiteError::MissingDist(dist_dir.to_path_buf()))
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log_event(LogLevel::Info, "shutdown_signal_unavailable", json!({}));
        std::future::pending::<()>().await;
    }
    log_event(LogLevel::Info, "shutdown_requested", json!({}));
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_u64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    bounds: (u64, u64),
) -> u64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_non_empty_string(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(value: &str) -> Result<Url, SiteError> {
    let parsed = Url::parse(value).map_err(|error| SiteError::InvalidBaseUrl {
        value: value.to_string(),
        reason: error.to_string(),
    })?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Ok(parsed)
    } else {
        Err(SiteError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme {:?}", parsed.scheme()),
        })
    }
}
