use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,
    #[error("API endpoint not found")]
    EndpointNotFound,
    #[error("Metrics are not enabled")]
    MetricsDisabled,
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound | Self::EndpointNotFound | Self::MetricsDisabled => {
                StatusCode::NOT_FOUND
            }
            Self::Io(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (
            status,
            [(header::CACHE_CONTROL, "no-store")],
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}
