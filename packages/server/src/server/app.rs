//! Application setup and router assembly.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use structuring::{DocumentStore, Pipeline};

use crate::server::routes::{
    analyze_image_handler, health_handler, list_documents_handler, receive_data_handler,
};

/// Captures can carry whole page bodies; match the original 12 MB cap.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn DocumentStore>,
}

/// Build the router without the rate limiter.
///
/// This is what the tests drive: the governor layer needs peer-address
/// information that `oneshot` requests do not carry.
pub fn router(state: AppState) -> Router {
    // The extension posts from arbitrary page origins
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/receive_data", post(receive_data_handler))
        .route("/analyze_image", post(analyze_image_handler))
        .route("/documents", get(list_documents_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Build the full application: router plus per-IP rate limiting.
pub fn build_app(state: AppState) -> Router {
    // 10 requests per 30 seconds per IP, matching the original limiter
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(3)
            .burst_size(10)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    router(state).layer(GovernorLayer {
        config: rate_limit_config,
    })
}
