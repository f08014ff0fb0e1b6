use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{error::ApiError, state::ApiState};

/// URL prefix under which snapshots are served directly
pub const SNAPSHOT_PREFIX: &str = "/snapshot";

/// Create the snapshot routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/snapshot", get(serve_snapshot))
        .route("/snapshot/", get(serve_snapshot))
        .route("/snapshot/{*path}", get(serve_snapshot))
}

async fn serve_snapshot(State(state): State<ApiState>, uri: Uri) -> Result<Response, ApiError> {
    let path = uri.path().strip_prefix(SNAPSHOT_PREFIX).unwrap_or("/");

    Ok(match state.snapshots.load(path).await? {
        Some(snapshot) => snapshot.into_response(),
        None => (StatusCode::NOT_FOUND, "Snapshot not found").into_response(),
    })
}
