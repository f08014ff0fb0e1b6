//! Site-level endpoints around the SPA: health, crawler metadata, manifest
//! and the shell fallback.

use std::io::ErrorKind;

use axum::{
    Json, Router,
    extract::State,
    http::{Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::{error::ApiError, metrics::metrics_handler, state::ApiState};

const SPA_SHELL_FILE: &str = "index.html";
const MANIFEST_FILE: &str = "manifest.json";

/// Shell served when the public directory has no `index.html`
const DEFAULT_SPA_SHELL: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Component Gallery</title>
    <link rel="manifest" href="/manifest.json" />
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/assets/main.js"></script>
  </body>
</html>
"#;

/// Create the site routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/robots.txt", get(robots_txt))
        .route("/manifest.json", get(manifest))
        .route("/site.webmanifest", get(manifest))
        .route("/metrics", get(metrics_handler))
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(json!({
            "status": "ok",
            "timestamp": Utc::now().to_rfc3339(),
            "uptime": state.started_at.elapsed().as_secs_f64(),
            "environment": state.environment.as_str(),
        })),
    )
}

async fn robots_txt(State(state): State<ApiState>) -> impl IntoResponse {
    let mut body = String::from("User-agent: *\nAllow: /\n");
    if let Some(url) = &state.public_url {
        body.push_str(&format!("\nSitemap: {}/sitemap.xml\n", url.trim_end_matches('/')));
    }

    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// Web app manifest from the public directory, or the built-in default when
/// the file is missing or not valid JSON
async fn manifest(State(state): State<ApiState>) -> Result<Response, ApiError> {
    let path = state.public_dir.join(MANIFEST_FILE);

    let manifest = match tokio::fs::read(&path).await {
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|err| {
            tracing::warn!(path = %path.display(), error = %err, "Invalid manifest, using default");
            default_manifest()
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => default_manifest(),
        Err(err) => return Err(err.into()),
    };

    Ok((
        [(header::CONTENT_TYPE, "application/manifest+json")],
        manifest.to_string(),
    )
        .into_response())
}

fn default_manifest() -> Value {
    json!({
        "name": "Component Gallery",
        "short_name": "Gallery",
        "start_url": "/",
        "display": "standalone",
        "background_color": "#ffffff",
        "theme_color": "#6200ee",
        "icons": [
            { "src": "/assets/icon-192.png", "sizes": "192x192", "type": "image/png" },
            { "src": "/assets/icon-512.png", "sizes": "512x512", "type": "image/png" }
        ]
    })
}

/// Fallback for every unrouted path.
///
/// Unknown API paths get a JSON 404, everything else gets the SPA shell and
/// is routed client-side.
pub async fn fallback(State(state): State<ApiState>, uri: Uri) -> Result<Response, ApiError> {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return Err(ApiError::EndpointNotFound);
    }

    let shell_path = state.public_dir.join(SPA_SHELL_FILE);
    let shell = match tokio::fs::read_to_string(&shell_path).await {
        Ok(shell) => shell,
        Err(err) if err.kind() == ErrorKind::NotFound => DEFAULT_SPA_SHELL.to_string(),
        Err(err) => return Err(err.into()),
    };

    Ok(Html(shell).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest_shape() {
        let manifest = default_manifest();

        assert_eq!(manifest["start_url"], "/");
        assert_eq!(manifest["icons"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_default_shell_mounts_app() {
        assert!(DEFAULT_SPA_SHELL.contains(r#"<div id="root">"#));
        assert!(DEFAULT_SPA_SHELL.contains("/manifest.json"));
    }
}
