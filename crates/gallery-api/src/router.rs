use std::any::Any;

use axum::{
    Json, Router,
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    metrics::track_metrics,
    site,
    snapshot::{self, prerender_for_bots},
    state::ApiState,
    users,
};

/// Routes without state or cross-cutting layers
pub fn router() -> Router<ApiState> {
    Router::new()
        .merge(site::routes())
        .merge(users::routes())
        .merge(snapshot::routes())
        .fallback(site::fallback)
}

/// Full application: routes, static assets, snapshot routing for bots,
/// metrics, panic recovery and request tracing
pub fn app(state: ApiState) -> Router {
    let assets = ServeDir::new(state.public_dir.join("assets"));

    router()
        .nest_service("/assets", assets)
        .layer(middleware::from_fn_with_state(state.clone(), prerender_for_bots))
        .layer(middleware::from_fn(track_metrics))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a handler panic into a JSON 500, logged inside the request span
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| panic.downcast_ref::<&str>().map(ToString::to_string))
        .unwrap_or_else(|| "Internal server error".to_string());

    tracing::error!(error = %message, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CACHE_CONTROL, "no-store")],
        Json(json!({ "error": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_is_surfaced() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(String::from("owned boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}
