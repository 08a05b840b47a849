use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use chrono::Utc;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, info_span};
use uuid::Uuid;

use crate::builder::DocumentBuilder;
use crate::error::ApiError;
use crate::models::ItineraryPayload;
use crate::resources::RenderResources;

const MAX_FILENAME_CHARS: usize = 80;

#[derive(Clone)]
pub struct AppState {
    pub builder: DocumentBuilder,
}

impl AppState {
    pub fn new(resources: Arc<RenderResources>) -> Self {
        Self {
            builder: DocumentBuilder::new(resources),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/itinerary/pdf", post(export_itinerary_pdf))
        .route("/healthz", get(healthz))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn export_itinerary_pdf(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let document = ItineraryPayload::from_json(body)?.into_document(Utc::now())?;

    let render_id = Uuid::new_v4();
    let span = info_span!("render", %render_id);
    let filename = download_filename(document.title(), document.customer_name.as_deref());
    info!(parent: &span, sections = document.sections.len(), %filename, "📄 Export requested");

    let builder = state.builder.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        builder.build(&document)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))??;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&filename)?);
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    Ok((StatusCode::OK, headers, Bytes::from(bytes)).into_response())
}

/// `"{title} - {traveller}"`, or the title alone when no traveller was named, cut to
/// 80 characters, with a `.pdf` extension.
pub fn download_filename(title: &str, traveller: Option<&str>) -> String {
    let stem = match traveller.map(str::trim).filter(|t| !t.is_empty()) {
        Some(traveller) => format!("{title} - {traveller}"),
        None => title.to_string(),
    };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .take(MAX_FILENAME_CHARS)
        .collect();
    format!("{}.pdf", stem.trim())
}

/// Plain ASCII `filename` for old clients plus the percent-encoded UTF-8 `filename*`.
fn content_disposition(filename: &str) -> Result<HeaderValue, ApiError> {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .collect();
    let value = format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    );
    HeaderValue::from_str(&value).map_err(|e| ApiError::Internal(e.to_string()))
}
