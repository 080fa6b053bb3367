// Main entry point for the capture server

use std::sync::Arc;

use anyhow::{Context, Result};
use gemini_client::GeminiClient;
use structuring::{
    DocumentStore, GenerativeEnricher, MemoryStore, NlpEnricher, Pipeline, RestDocumentStore,
    StructuringConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server_core::{build_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,structuring=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting capture server");

    // Load configuration (.env in development)
    let _ = dotenvy::dotenv();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Probe the generative model before accepting requests. The decision
    // is process-wide; early requests must not race it.
    let generative = select_generative_enricher(&config).await;

    let mut pipeline = Pipeline::new(StructuringConfig::default())
        .with_enricher(Arc::new(NlpEnricher::new(config.nlp_service_url.clone())));
    if let Some(enricher) = generative {
        pipeline = pipeline.with_enricher(Arc::new(enricher));
    }
    tracing::info!(enrichers = ?pipeline.enricher_names(), "structuring pipeline ready");

    // Store selection: remote document API when configured
    let store: Arc<dyn DocumentStore> =
        match (&config.documents_api_url, &config.documents_api_key) {
            (Some(url), Some(key)) => {
                tracing::info!(url = %url, "using remote document store");
                Arc::new(RestDocumentStore::new(url.clone(), key.clone()))
            }
            _ => {
                tracing::warn!("document API not configured, captures stored in memory only");
                Arc::new(MemoryStore::new())
            }
        };

    let app = build_app(AppState {
        pipeline: Arc::new(pipeline),
        store,
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Listening on {}", addr);
    tracing::info!("Ingestion endpoint: http://localhost:{}/receive_data", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}

/// Decide the generative strategy for the process lifetime.
async fn select_generative_enricher(config: &Config) -> Option<GenerativeEnricher> {
    if !config.use_ai {
        tracing::info!("generative enrichment disabled (USE_AI=false)");
        return None;
    }

    let Some(api_key) = &config.gemini_api_key else {
        tracing::warn!("GEMINI_API_KEY not set, generative enrichment disabled");
        return None;
    };

    let client = GeminiClient::new(api_key.clone());
    GenerativeEnricher::probe(client, config.gemini_model.as_deref()).await
}
