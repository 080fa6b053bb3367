//! Read-back listing for the dashboard: stored documents, newest first.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::server::app::AppState;

const DEFAULT_LIMIT: usize = 50;

#[derive(Deserialize)]
pub struct ListParams {
    limit: Option<usize>,
}

pub async fn list_documents_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);

    match state.store.list(limit).await {
        Ok(documents) => (StatusCode::OK, Json(documents)).into_response(),
        Err(e) => {
            error!(error = %e, "document listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to list documents" })),
            )
                .into_response()
        }
    }
}
