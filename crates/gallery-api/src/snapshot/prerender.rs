use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::routes::SNAPSHOT_PREFIX;
use crate::{
    bot::{BotClassifier, should_bypass_bot_detection},
    metrics,
    state::ApiState,
};

/// How the snapshot router treats an incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrerenderDecision {
    /// Detection skipped: API, assets, health checks, crawler metadata
    Bypass,
    /// Regular client, normal serving
    Human,
    /// Crawler, serve a snapshot when one exists
    Bot,
}

impl PrerenderDecision {
    pub fn for_request(
        classifier: &BotClassifier,
        method: &Method,
        path: &str,
        headers: &HeaderMap,
    ) -> Self {
        if (method != Method::GET && method != Method::HEAD) || should_bypass_bot_detection(path) {
            Self::Bypass
        } else if classifier.is_bot(headers) {
            Self::Bot
        } else {
            Self::Human
        }
    }
}

/// Snapshot location for a page path, `/snapshot/` for the root
pub fn snapshot_path_for(path: &str) -> String {
    if path == "/" {
        format!("{SNAPSHOT_PREFIX}/")
    } else {
        format!("{SNAPSHOT_PREFIX}{path}")
    }
}

/// Middleware serving pre-rendered snapshots to crawlers.
///
/// Bots asking for a page with a snapshot get the snapshot with crawler
/// headers. Everyone else, and bots asking for a page without a snapshot,
/// continue to the regular routes.
pub async fn prerender_for_bots(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();

    let decision = PrerenderDecision::for_request(&state.bots, req.method(), &path, req.headers());
    if decision != PrerenderDecision::Bot {
        return next.run(req).await;
    }

    let snapshot_path = snapshot_path_for(&path);
    let lookup = snapshot_path
        .strip_prefix(SNAPSHOT_PREFIX)
        .unwrap_or(&snapshot_path);

    match state.snapshots.load(lookup).await {
        Ok(Some(snapshot)) => {
            metrics::record_snapshot_lookup(true);
            tracing::info!(
                path = %path,
                snapshot = %snapshot.path.display(),
                "Serving pre-rendered snapshot to bot"
            );
            with_crawler_headers(snapshot.into_response())
        }
        Ok(None) => {
            metrics::record_snapshot_lookup(false);
            tracing::debug!(path = %path, snapshot_path = %snapshot_path, "No snapshot for bot request, serving SPA");
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(path = %path, error = %err, "Failed to read snapshot, serving SPA");
            next.run(req).await
        }
    }
}

fn with_crawler_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("x-robots-tag"),
        HeaderValue::from_static("all"),
    );
    headers.insert(
        HeaderName::from_static("x-pre-rendered"),
        HeaderValue::from_static("true"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );
    response
}
