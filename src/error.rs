use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Asset loading failures. Never leaves `resources`: callers fall back instead.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("font error: {0}")]
    Font(String),
    #[error("logo error: {0}")]
    Logo(String),
    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf assembly failed: {0}")]
    Pdf(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("request must include itinerary.days[] or days[]")]
    MissingDays,
    #[error("malformed itinerary payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InvalidRequest(ref msg) => (StatusCode::BAD_REQUEST, "InvalidRequest", msg.clone()),
            Self::Render(_) | Self::Internal(_) => {
                tracing::error!("❌ {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RenderFailed",
                    "Could not generate the itinerary document".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": code, "message": message }))).into_response()
    }
}
