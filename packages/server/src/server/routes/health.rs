use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    /// Active enrichment strategies, in priority order. Empty means every
    /// capture takes the heuristic path.
    enrichers: Vec<String>,
}

/// Health check endpoint.
///
/// Reports which enrichment strategies survived startup; degraded
/// enrichment is visible here rather than per-request.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        enrichers: state
            .pipeline
            .enricher_names()
            .into_iter()
            .map(String::from)
            .collect(),
    })
}
