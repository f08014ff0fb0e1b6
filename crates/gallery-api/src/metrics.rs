//! Prometheus metrics for request traffic, bot routing and search scans.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use regex::Regex;

use crate::{error::ApiError, state::ApiState};

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+(/|$)").expect("numeric segment pattern is valid"));

/// Install the Prometheus recorder
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.35, 0.5, 1.0, 2.5, 5.0,
            ],
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Middleware recording request count and latency per normalized path
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Collapse numeric path segments so user IDs do not explode label cardinality
fn normalize_path(path: &str) -> String {
    // Applied twice since adjacent numeric segments share a slash
    let once = NUMERIC_SEGMENT.replace_all(path, "/:id$1");
    NUMERIC_SEGMENT.replace_all(&once, "/:id$1").into_owned()
}

/// Handler for `GET /metrics`
pub async fn metrics_handler(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::MetricsDisabled)?;
    Ok(handle.render())
}

/// Record a bot classification, `source` is `cache` or `classifier`
pub fn record_bot_verdict(source: &'static str, is_bot: bool) {
    counter!(
        "bot_verdicts_total",
        "source" => source,
        "verdict" => if is_bot { "bot" } else { "human" }
    )
    .increment(1);
}

/// Record a bot request against the snapshot store
pub fn record_snapshot_lookup(found: bool) {
    counter!(
        "snapshot_lookups_total",
        "result" => if found { "hit" } else { "miss" }
    )
    .increment(1);
}

/// Record a search scan and whether its total was exact
pub fn record_search(exact: bool) {
    counter!(
        "user_searches_total",
        "count" => if exact { "exact" } else { "estimated" }
    )
    .increment(1);
}
