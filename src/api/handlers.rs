//! API Handlers
//!
//! HTTP request handlers for the checker endpoints: the probe API, the
//! landing page, and the ambient stats/health endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Query, State},
    http::{header, HeaderMap},
    response::Html,
    Form, Json,
};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::ProbeCache;
use crate::config::{Config, GameConfig, GameRegistry};
use crate::error::Result;
use crate::models::{
    HealthResponse, PrefillQuery, ProbeRequest, ProbeResponse, StatsResponse, Target,
};
use crate::probe::ProbeClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe probe result cache
    pub cache: Arc<RwLock<ProbeCache>>,
    /// Immutable game registry, loaded once at startup
    pub registry: Arc<GameRegistry>,
    /// UDP probe client
    pub probe: ProbeClient,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(cache: ProbeCache, registry: GameRegistry, probe: ProbeClient) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            registry: Arc::new(registry),
            probe,
        }
    }

    /// Creates state from runtime configuration plus a loaded registry.
    pub fn from_config(config: &Config, registry: GameRegistry) -> Self {
        let cache = ProbeCache::new(config.max_entries, config.cache_ttl);
        let probe = ProbeClient::new(Duration::from_secs(config.probe_timeout));
        Self::new(cache, registry, probe)
    }
}

/// Handler for POST /api
///
/// Probes the `ip_port` target, or serves the outcome cached within the
/// TTL window. `Fresh` tells the caller which of the two happened. An
/// unusable address short-circuits to the error shape before any cache
/// lookup or network I/O.
pub async fn api_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(req): Form<ProbeRequest>,
) -> Result<Json<ProbeResponse>> {
    let config = state.registry.resolve(host_header(&headers));
    let target = Target::parse(&req.ip_port, config.default_port)?;
    let key = target.key();

    // Write lock even for the lookup: lazy expiry and stats mutate.
    {
        let mut cache = state.cache.write().await;
        if let Some(entry) = cache.lookup(&key) {
            debug!("cache hit for {}", key);
            return Ok(Json(ProbeResponse::cached(entry.server_online)));
        }
    }

    // The lock is not held across the probe, so concurrent misses on the
    // same key may each probe; every store is atomic and the last wins.
    info!("probing {}", key);
    let online = state
        .probe
        .probe(&config.byte_array, &target.ip, target.port)
        .await;

    let mut cache = state.cache.write().await;
    cache.store(&key, online);

    Ok(Json(ProbeResponse::fresh(online)))
}

/// Handler for GET /
///
/// Renders the landing page with the probe target pre-filled from the
/// `url`/`ip`/`port` query parameters, falling back to the caller's own
/// address and the resolving game's default port.
pub async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PrefillQuery>,
    remote: Option<ConnectInfo<SocketAddr>>,
) -> Html<String> {
    let host = host_header(&headers);
    let config = state.registry.resolve(host);

    let mut client_ip = client_ip(&headers, remote);
    let mut client_port = config.default_port.to_string();

    if let Some(url) = &query.url {
        // Combined `ip[:port]` pre-fill; unusable input keeps the defaults
        if let Ok(target) = Target::parse(url, config.default_port) {
            client_ip = target.ip;
            client_port = target.port.to_string();
        }
    } else {
        if let Some(ip) = &query.ip {
            client_ip = ip.clone();
        }
        if let Some(port) = &query.port {
            client_port = port.clone();
        }
    }

    debug!("landing page for '{}' opened from {}", config.name, client_ip);

    let others = if state.registry.settings().show_other_servers {
        other_servers(&state.registry, host)
    } else {
        Vec::new()
    };

    Html(render_index(config, &client_ip, &client_port, &others))
}

/// Handler for GET /stats
///
/// Returns current probe cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.evictions,
        stats.entries,
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Helpers ==

fn host_header(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Resolves the client address for display: `X-Real-IP`, then
/// `X-Forwarded-For`, then the transport remote address. Display only,
/// never used for routing.
fn client_ip(headers: &HeaderMap, remote: Option<ConnectInfo<SocketAddr>>) -> String {
    header_value(headers, "x-real-ip")
        .or_else(|| header_value(headers, "x-forwarded-for"))
        .map(str::to_string)
        .unwrap_or_else(|| {
            remote
                .map(|ConnectInfo(addr)| addr.ip().to_string())
                .unwrap_or_default()
        })
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Sibling games listed on the landing page: every config whose canonical
/// domain is not the current host.
fn other_servers(registry: &GameRegistry, host: &str) -> Vec<(String, String)> {
    let host = host.to_ascii_lowercase();
    registry
        .games()
        .iter()
        .filter(|game| game.canonical_domain().to_ascii_lowercase() != host)
        .map(|game| {
            (
                game.name.clone(),
                format!("https://{}", game.canonical_domain()),
            )
        })
        .collect()
}

fn render_index(
    config: &GameConfig,
    ip: &str,
    port: &str,
    others: &[(String, String)],
) -> String {
    let other_links: String = others
        .iter()
        .map(|(name, url)| {
            format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape_html(url),
                escape_html(name)
            )
        })
        .collect();
    let other_block = if other_links.is_empty() {
        String::new()
    } else {
        format!(
            "<h2>Other server checkers</h2>\n<ul>{}</ul>",
            other_links
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{name} Server Checker</title></head>
<body>
<h1>{name} Server Checker</h1>
<form id="check" method="post" action="/api">
  <input name="ip_port" value="{ip}:{port}">
  <button type="submit">Check</button>
</form>
<p>Default port: {default_port}</p>
{other_block}
</body>
</html>
"#,
        name = escape_html(&config.name),
        ip = escape_html(ip),
        port = escape_html(port),
        default_port = config.default_port,
        other_block = other_block,
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
