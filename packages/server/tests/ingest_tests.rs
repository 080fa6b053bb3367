//! Router-level tests: ingestion status codes, JSON bodies, storage paths.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use server_core::{router, AppState};
use structuring::testing::{FailingStore, MockEnricher};
use structuring::{DocumentDraft, DocumentStore, MemoryStore, Pipeline, StructuringConfig};

const SCENARIO_TEXT: &str = "Title: Test Page\nURL: http://example.com\n\nSome long body text repeated to exceed twenty characters.";

fn heuristic_only_app(store: Arc<dyn DocumentStore>) -> Router {
    router(AppState {
        pipeline: Arc::new(Pipeline::new(StructuringConfig::default())),
        store,
    })
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_text(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_short_capture_rejected_with_400() {
    let app = heuristic_only_app(Arc::new(MemoryStore::new()));

    let response = app
        .oneshot(post_text("/receive_data", "too short"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Insufficient text data.");
}

#[tokio::test]
async fn test_heuristic_capture_stored_and_returned() {
    let store = Arc::new(MemoryStore::new());
    let app = heuristic_only_app(store.clone());

    let response = app
        .oneshot(post_text("/receive_data", SCENARIO_TEXT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Test Page");
    assert_eq!(body["source_url"], "http://example.com");
    assert_eq!(body["media_urls"], serde_json::json!([]));
    assert_eq!(body["nlp_processed"], false);
    assert!(body["summary"].as_str().unwrap().ends_with("..."));

    assert_eq!(store.document_count(), 1);
    let stored = store.list(10).await.unwrap();
    assert_eq!(stored[0].record.title, "Test Page");
    assert!(stored[0].record.raw_content.is_some());
}

#[tokio::test]
async fn test_json_capture_with_content_field() {
    let app = heuristic_only_app(Arc::new(MemoryStore::new()));

    let payload = serde_json::json!({ "content": SCENARIO_TEXT }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/receive_data")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Test Page");
}

#[tokio::test]
async fn test_storage_failure_is_distinguishable_server_error() {
    let app = heuristic_only_app(Arc::new(FailingStore::new()));

    let response = app
        .oneshot(post_text("/receive_data", SCENARIO_TEXT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Failed to save to database");
    assert!(body["details"].as_str().unwrap().contains("storage"));
}

#[tokio::test]
async fn test_enriched_capture_reports_provenance() {
    let draft = DocumentDraft {
        summary: Some("S".to_string()),
        keywords: vec!["a".to_string(), "b".to_string()],
        emotions: vec!["POSITIVE".to_string()],
        sentiment_score: Some(0.9),
        nlp_processed: true,
        ..DocumentDraft::default()
    };
    let app = router(AppState {
        pipeline: Arc::new(
            Pipeline::new(StructuringConfig::default())
                .with_enricher(Arc::new(MockEnricher::succeeding("nlp", draft))),
        ),
        store: Arc::new(MemoryStore::new()),
    });

    let response = app
        .oneshot(post_text("/receive_data", SCENARIO_TEXT))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["summary"], "S");
    assert_eq!(body["emotions"], serde_json::json!(["POSITIVE"]));
    assert_eq!(body["sentiment_score"], 0.9);
    assert_eq!(body["nlp_processed"], true);
}

#[tokio::test]
async fn test_analyze_image_placeholder() {
    let app = heuristic_only_app(Arc::new(MemoryStore::new()));

    let request = Request::builder()
        .method("POST")
        .uri("/analyze_image")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["keywords"],
        serde_json::json!(["technology", "web", "digital", "content"])
    );
}

#[tokio::test]
async fn test_documents_listing() {
    let store = Arc::new(MemoryStore::new());
    let app = heuristic_only_app(store.clone());

    let response = app
        .clone()
        .oneshot(post_text("/receive_data", SCENARIO_TEXT))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri("/documents?limit=5")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["title"], "Test Page");
    assert!(listed[0]["id"].is_string());
}

#[tokio::test]
async fn test_health_reports_enrichers() {
    let app = router(AppState {
        pipeline: Arc::new(
            Pipeline::new(StructuringConfig::default()).with_enricher(Arc::new(
                MockEnricher::failing("nlp"),
            )),
        ),
        store: Arc::new(MemoryStore::new()),
    });

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["enrichers"], serde_json::json!(["nlp"]));
}
