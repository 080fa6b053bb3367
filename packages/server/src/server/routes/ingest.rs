//! Ingestion entry point - raw capture in, structured document out.
//!
//! Accepts either a plain-text body or a JSON object with a `text` (or
//! `content`) field. The three failure modes stay distinguishable for the
//! caller: invalid input is a 400, a storage failure is a 500 naming the
//! database, and anything else unexpected is a bare 500.

use axum::{
    body::Bytes,
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error, info};

use structuring::{DocumentRecord, StructuringError};

use crate::server::app::AppState;

pub async fn receive_data_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let raw_text = raw_text_from_body(&headers, &body);
    debug!(chars = raw_text.chars().count(), "received capture");

    let document = match state.pipeline.structure(&raw_text).await {
        Ok(document) => document,
        Err(StructuringError::InvalidInput { reason }) => {
            debug!(reason = %reason, "rejected capture");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Insufficient text data." })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "structuring failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server failed." })),
            )
                .into_response();
        }
    };

    let record = DocumentRecord::from_document(&document, &raw_text);
    match state.store.insert(&record).await {
        Ok(stored) => {
            info!(id = %stored.id, title = %document.title, "document stored");
            (StatusCode::OK, Json(document)).into_response()
        }
        Err(e) => {
            error!(error = %e, "document insert failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to save to database",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Pull the raw capture text out of the request body.
///
/// JSON bodies may be an object carrying `text`/`content` or a bare JSON
/// string; anything else is treated as plain text verbatim.
fn raw_text_from_body(headers: &HeaderMap, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);

    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
            if let Some(s) = value
                .get("text")
                .and_then(|v| v.as_str())
                .or_else(|| value.get("content").and_then(|v| v.as_str()))
            {
                return s.to_string();
            }
            if let Some(s) = value.as_str() {
                return s.to_string();
            }
            // JSON without usable text - falls through validation as empty
            return String::new();
        }
    }

    text.into_owned()
}
