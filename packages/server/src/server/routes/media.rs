//! Image analysis placeholder.
//!
//! The reverse-image-search flow posts here, but no vision backend is
//! wired up; the response is a fixed keyword set and says so. Not a real
//! contract - do not build on it.

use axum::Json;
use serde_json::{json, Value};

pub async fn analyze_image_handler() -> Json<Value> {
    Json(json!({
        "keywords": ["technology", "web", "digital", "content"],
        "message": "Image analysis not yet implemented - using mock keywords",
    }))
}
